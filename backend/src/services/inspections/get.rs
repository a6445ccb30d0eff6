use crate::services::{load_inspection, require_template, ServiceError};
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::edit::EditSession;

/// `GET /api/inspections/{id}`: the inspection together with its summary.
pub async fn process(store: web::Data<Store>, id: web::Path<String>) -> impl Responder {
    match open_session(&store, &id) {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => e.error_response(),
    }
}

pub fn open_session(store: &Store, id: &str) -> Result<EditSession, ServiceError> {
    let inspection = load_inspection(store, id)?;
    let template = require_template(store)?;
    Ok(EditSession::open(inspection, &template))
}
