use crate::services::ServiceError;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::inspection::Inspection;

/// `GET /api/inspections`: every stored inspection, most recently updated
/// first.
pub async fn process(store: web::Data<Store>) -> impl Responder {
    match list_inspections(&store) {
        Ok(inspections) => HttpResponse::Ok().json(inspections),
        Err(e) => e.error_response(),
    }
}

pub fn list_inspections(store: &Store) -> Result<Vec<Inspection>, ServiceError> {
    let mut inspections = store.inspections()?;
    inspections.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(inspections)
}
