//! # Inspection Edit Service
//!
//! `PATCH /api/inspections/{id}` with one `Edit` message, e.g.
//! `{"op": "setResult", "itemId": "item1", "result": "PASS"}`.
//!
//! The stored inspection is opened as an `EditSession`, the edit applied
//! (which refreshes `updatedAt` and the summary) and the result written back
//! whole. A rejected edit writes nothing. Concurrent edits to the same
//! inspection are not merged: the last write wins.

use crate::services::{load_inspection, require_template, ServiceError};
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use chrono::Utc;
use common::edit::{Edit, EditSession};
use log::{debug, warn};

pub async fn process(
    store: web::Data<Store>,
    id: web::Path<String>,
    edit: web::Json<Edit>,
) -> impl Responder {
    match update_inspection(&store, &id, edit.into_inner()) {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => {
            warn!("Edit on inspection {} rejected: {}", id, e);
            e.error_response()
        }
    }
}

pub fn update_inspection(store: &Store, id: &str, edit: Edit) -> Result<EditSession, ServiceError> {
    let inspection = load_inspection(store, id)?;
    let template = require_template(store)?;
    debug!("Applying {} to inspection {}", edit_name(&edit), id);
    let next = EditSession::open(inspection, &template).apply(edit, &template, Utc::now())?;
    store.save_inspection(&next.inspection)?;
    Ok(next)
}

fn edit_name(edit: &Edit) -> &'static str {
    match edit {
        Edit::SetSiteName { .. } => "setSiteName",
        Edit::SetInspectorName { .. } => "setInspectorName",
        Edit::SetGeneralNotes { .. } => "setGeneralNotes",
        Edit::SetResult { .. } => "setResult",
        Edit::SetComment { .. } => "setComment",
        Edit::SetPhoto { .. } => "setPhoto",
        Edit::RemovePhoto { .. } => "removePhoto",
    }
}
