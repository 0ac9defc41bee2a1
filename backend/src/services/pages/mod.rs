//! # Page Service Module
//!
//! CRUD for dynamic pages under `/api/pages`, forwarded to the platform's `pages` resource.
//!
//! ## Sub-modules:
//! - `list`: every page, falling back to an empty list when the platform is down.
//! - `get`: one page by id. Not found and unreachable are reported, never papered over.
//! - `save`: create and update, validated before anything is forwarded.
//! - `delete`: removes a page.

mod delete;
mod get;
mod list;
mod save;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use serde_json::Value;

/// The base path for all page-related API endpoints.
const API_PATH: &str = "/api/pages";

/// Configures and returns the Actix `Scope` for the page routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `list::process`
/// *   **`POST /`**: `save::create`
/// *   **`GET /{page_id}`**: `get::process`
/// *   **`PUT /{page_id}`**: `save::update`
/// *   **`DELETE /{page_id}`**: `delete::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/{page_id}", get().to(get::process))
        .route("/{page_id}", put().to(save::update))
        .route("/{page_id}", delete().to(delete::process))
}

/// Some platform deployments store `content` as serialized text. Parse it back into the
/// structured document so every page leaves the proxy in one shape.
fn inline_content(mut record: Value) -> Value {
    if let Some(content) = record.get_mut("content") {
        let parsed = match content {
            Value::String(text) => Some(serde_json::from_str(text).unwrap_or(Value::Null)),
            _ => None,
        };
        if let Some(parsed) = parsed {
            *content = parsed;
        }
        if content.is_null() {
            *content = serde_json::json!({ "sections": [] });
        }
    }
    record
}
