use crate::services::ServiceError;
use crate::store::Store;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::transfer::ExportBundle;
use log::info;

/// `GET /api/transfer/export`: `{ exportedAt, template, inspections }` as a
/// downloadable JSON file. `template` is `null` before one is loaded.
pub async fn process(store: web::Data<Store>) -> impl Responder {
    match export_bundle(&store) {
        Ok(bundle) => HttpResponse::Ok()
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(bundle.file_name())],
            })
            .json(bundle),
        Err(e) => e.error_response(),
    }
}

pub fn export_bundle(store: &Store) -> Result<ExportBundle, ServiceError> {
    let template = store.current_template()?;
    let inspections = store.inspections()?;
    info!("Exporting {} inspections", inspections.len());
    Ok(ExportBundle::new(template, inspections, Utc::now()))
}
