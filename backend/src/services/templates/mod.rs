//! # Template Service Module
//!
//! Endpoints for the singleton checklist template, under `/api/template`.
//!
//! ## Sub-modules:
//! - `get`: Returns the current template.
//! - `save`: Validates a template source document and replaces the current one.

mod get;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for template endpoints.
const API_PATH: &str = "/api/template";

/// Configures and returns the Actix `Scope` for template routes.
///
/// # Registered Routes:
///
/// *   **`GET ""`**: `get::process`. The current template as JSON, or
///     `404 Not Found` before one has been loaded.
///
/// *   **`POST ""`**: `save::process`. The raw body is parsed as a template
///     source document. A document without a `sections` array, or with
///     duplicate ids, is rejected with `400 Bad Request` and the previous
///     template stays in place.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("", post().to(save::process))
}
