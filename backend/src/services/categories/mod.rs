//! # Category Service Module
//!
//! Course categories and their subcategories, under `/api/categories`.
//!
//! ## Sub-modules:
//! - `list`: all categories, empty when the platform is unreachable.
//! - `save`: creation, validated locally first.
//! - `delete`: removal by id.

mod delete;
mod list;
mod save;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/categories";

/// # Registered Routes:
///
/// *   **`GET /`**: `list::process`
/// *   **`POST /`**: `save::process`
/// *   **`DELETE /{category_id}`**: `delete::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::process))
        .route("/{category_id}", delete().to(delete::process))
}
