//! # Upload Service Module
//!
//! Receives files from the section editor and forwards them to the platform's storage.
//!
//! ## Sub-modules:
//! - `image`: single image upload used by image-valued section props.

mod image;

use actix_web::web::{post, scope};
use actix_web::Scope;

/// The base path for upload endpoints.
const API_PATH: &str = "/api/upload";

/// Configures and returns the Actix `Scope` for uploads.
///
/// # Registered Routes:
///
/// *   **`POST /image`**:
///     - **Handler**: `image::process`
///     - **Description**: Accepts a multipart form with one `file` part holding an image.
///       Answers with `{url}` pointing at the stored image.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/image", post().to(image::process))
}
