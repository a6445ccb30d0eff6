//! # PDF Report Service
//!
//! `GET /api/reports/{id}/pdf`.
//!
//! ## Workflow
//!
//! 1.  Load the inspection and the current template.
//! 2.  Hand both to `report::generate_pdf` on the blocking pool
//!     (`web::block`); layout, photo preparation and drawing all happen there
//!     so the async workers stay free.
//! 3.  Serve the bytes as `application/pdf` with an attachment disposition
//!     named `<site>_Inspection_Report.pdf`.
//!
//! A missing font family fails the whole request with `500`; a photo that
//! cannot be decoded is left out of the document.

use crate::config::ReportConfig;
use crate::report::{generate_pdf, PdfReport};
use crate::services::{load_inspection, require_template, ServiceError};
use crate::store::Store;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::error;

pub async fn process(
    store: web::Data<Store>,
    config: web::Data<ReportConfig>,
    id: web::Path<String>,
) -> impl Responder {
    match render_pdf(&store, config.into_inner(), &id).await {
        Ok(report) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(report.file_name)],
            })
            .body(report.bytes),
        Err(e) => {
            error!("PDF generation for inspection {} failed: {}", id, e);
            e.error_response()
        }
    }
}

pub async fn render_pdf(
    store: &Store,
    config: std::sync::Arc<ReportConfig>,
    id: &str,
) -> Result<PdfReport, ServiceError> {
    let inspection = load_inspection(store, id)?;
    let template = require_template(store)?;
    let report = web::block(move || generate_pdf(&inspection, &template, &config))
        .await
        .map_err(|e| ServiceError::Blocking(e.to_string()))??;
    Ok(report)
}
