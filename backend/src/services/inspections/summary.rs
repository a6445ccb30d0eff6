use crate::services::{load_inspection, require_template, ServiceError};
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::aggregate::{summarize, Summary};

/// `GET /api/inspections/{id}/summary`: bucket counts and overall status
/// against the current template.
pub async fn process(store: web::Data<Store>, id: web::Path<String>) -> impl Responder {
    match inspection_summary(&store, &id) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.error_response(),
    }
}

pub fn inspection_summary(store: &Store, id: &str) -> Result<Summary, ServiceError> {
    let inspection = load_inspection(store, id)?;
    let template = require_template(store)?;
    Ok(summarize(&inspection, &template))
}
