//! # Report Service Module
//!
//! Renders a stored inspection against the current template, under
//! `/api/reports`. Rendering never writes to the store.
//!
//! ## Sub-modules:
//! - `print`: HTML print view; the browser paginates it.
//! - `pdf`: direct PDF built on the blocking pool and served as an attachment.

mod pdf;
mod print;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/reports";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{id}/print", get().to(print::process))
        .route("/{id}/pdf", get().to(pdf::process))
}
