//! # Inspection Service Module
//!
//! Endpoints for the inspection lifecycle under `/api/inspections`: create,
//! list, read, edit, delete, summaries and photo slots. Every write is a
//! whole-record read-modify-write against the store.

mod create;
mod delete;
mod get;
mod list;
mod photos;
mod summary;
mod update;

pub(crate) use list::list_inspections;

use actix_web::web::{delete, get, patch, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/inspections";

/// # Registered Routes:
///
/// *   **`GET ""`**: `list::process`
/// *   **`POST ""`**: `create::process` (`409` without a template, `400` on
///     blank site or inspector name)
/// *   **`GET /{id}`**: `get::process`
/// *   **`PATCH /{id}`**: `update::process`
/// *   **`DELETE /{id}`**: `delete::process`
/// *   **`GET /{id}/summary`**: `summary::process`
/// *   **`POST /{id}/items/{item_id}/photos/{slot}`**: `photos::upload`
/// *   **`DELETE /{id}/items/{item_id}/photos/{slot}`**: `photos::remove`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", patch().to(update::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/summary", get().to(summary::process))
        .route(
            "/{id}/items/{item_id}/photos/{slot}",
            post().to(photos::upload),
        )
        .route(
            "/{id}/items/{item_id}/photos/{slot}",
            delete().to(photos::remove),
        )
}
