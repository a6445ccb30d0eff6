//! # Template Retrieval Service
//!
//! `GET /api/template`: reads the singleton record stored under the
//! `"current"` key and returns it as JSON.

use crate::services::ServiceError;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::Template;
use log::error;

/// # Returns
/// - `200 OK` with the template.
/// - `404 Not Found` when no template has been loaded yet.
/// - `503 Service Unavailable` if the store cannot be read.
pub async fn process(store: web::Data<Store>) -> impl Responder {
    match get_template(&store) {
        Ok(Some(template)) => HttpResponse::Ok().json(template),
        Ok(None) => HttpResponse::NotFound().body("No template has been loaded"),
        Err(e) => {
            error!("Error retrieving template: {}", e);
            e.error_response()
        }
    }
}

pub fn get_template(store: &Store) -> Result<Option<Template>, ServiceError> {
    Ok(store.current_template()?)
}
