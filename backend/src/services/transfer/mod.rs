//! # Transfer Service Module
//!
//! Bulk movement of data between installations, under `/api/transfer`.
//!
//! ## Sub-modules:
//! - `export`: the current template and every inspection as one JSON
//!   attachment.
//! - `import`: replaces the template and upserts inspections from such a
//!   bundle, best effort.

mod export;
mod import;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/transfer";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/export", get().to(export::process))
        .route("/import", post().to(import::process))
}
