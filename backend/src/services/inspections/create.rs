//! # Inspection Creation Service
//!
//! `POST /api/inspections` with `{ siteName, inspectorName, generalNotes? }`.
//!
//! ## Workflow
//!
//! 1.  Load the current template; without one nothing can be created
//!     (`409 Conflict`).
//! 2.  Validate the metadata and snapshot one blank response per template
//!     item (`Inspection::create`). Blank names are `400 Bad Request` and
//!     nothing is stored.
//! 3.  Persist the new record and answer `201 Created` with the inspection
//!     and its summary.

use crate::services::{require_template, ServiceError};
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::edit::EditSession;
use common::model::inspection::{Inspection, NewInspection};
use log::{info, warn};

pub async fn process(store: web::Data<Store>, payload: web::Json<NewInspection>) -> impl Responder {
    match create_inspection(&store, payload.into_inner()) {
        Ok(session) => HttpResponse::Created().json(session),
        Err(e) => {
            warn!("Inspection not created: {}", e);
            e.error_response()
        }
    }
}

pub fn create_inspection(store: &Store, new: NewInspection) -> Result<EditSession, ServiceError> {
    let template = require_template(store)?;
    let inspection = Inspection::create(new, &template, Utc::now())?;
    store.save_inspection(&inspection)?;
    info!(
        "Created inspection {} for site {}",
        inspection.id, inspection.site_name
    );
    Ok(EditSession::open(inspection, &template))
}
