//! # Import Service
//!
//! `POST /api/transfer/import` with a bundle shaped like an export.
//!
//! ## Workflow
//!
//! 1.  Parse the bundle. A present `template` must validate, otherwise the
//!     request fails before anything is written.
//! 2.  Replace the stored template when the bundle carries one.
//! 3.  Walk the inspection records in order: records without a non-empty
//!     string `id` are skipped and counted, the rest are upserted by id.
//! 4.  A malformed record stops the walk with `400 Bad Request`. Nothing is
//!     rolled back; records written before it stay.

use crate::services::ServiceError;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::transfer::{classify_record, ImportBundle, ImportRecord};
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub template_replaced: bool,
    pub upserted: usize,
    pub skipped: usize,
}

pub async fn process(store: web::Data<Store>, body: String) -> impl Responder {
    match import_bundle(&store, &body) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            warn!("Import stopped: {}", e);
            e.error_response()
        }
    }
}

pub fn import_bundle(store: &Store, source: &str) -> Result<ImportReport, ServiceError> {
    let bundle = ImportBundle::parse(source)?;
    let mut report = ImportReport::default();

    if let Some(template) = &bundle.template {
        store.save_template(template)?;
        report.template_replaced = true;
    }

    for record in bundle.records {
        match classify_record(record)? {
            ImportRecord::Upsert(inspection) => {
                store.save_inspection(&inspection)?;
                report.upserted += 1;
            }
            ImportRecord::Skip => report.skipped += 1,
        }
    }

    info!(
        "Import finished: template replaced {}, {} upserted, {} skipped",
        report.template_replaced, report.upserted, report.skipped
    );
    Ok(report)
}
