use crate::services::ServiceError;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::info;

/// `DELETE /api/inspections/{id}`: removes the record for good.
///
/// # Returns
/// - `204 No Content` once deleted.
/// - `404 Not Found` if there was nothing to delete.
pub async fn process(store: web::Data<Store>, id: web::Path<String>) -> impl Responder {
    match delete_inspection(&store, &id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

pub fn delete_inspection(store: &Store, id: &str) -> Result<(), ServiceError> {
    if !store.delete_inspection(id)? {
        return Err(ServiceError::InspectionNotFound(id.to_string()));
    }
    info!("Deleted inspection {}", id);
    Ok(())
}
