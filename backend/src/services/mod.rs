//! # HTTP Services
//!
//! Every API endpoint lives in one of the scopes below; each scope module
//! exposes `configure_routes()` and one handler module per endpoint.
//!
//! - `templates`: the singleton checklist template.
//! - `inspections`: inspection lifecycle, edits and photo uploads.
//! - `reports`: print view and PDF rendering.
//! - `transfer`: bulk export and import.
//! - `index`: landing page listing stored inspections.
//!
//! Handlers share a [`Store`] and the [`ReportConfig`] through `web::Data`
//! and report failures as [`ServiceError`].

pub mod index;
pub mod inspections;
pub mod reports;
pub mod templates;
pub mod transfer;

use crate::report::ReportError;
use crate::store::{Store, StoreError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::error::{EditError, TemplateError, TransferError, ValidationError};
use common::model::inspection::Inspection;
use common::model::template::Template;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Inspection `{0}` not found")]
    InspectionNotFound(String),

    #[error("No template has been loaded")]
    NoTemplate,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("Invalid upload: {0}")]
    Upload(String),

    #[error("Storage unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("Worker pool unavailable: {0}")]
    Blocking(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InspectionNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::NoTemplate => StatusCode::CONFLICT,
            ServiceError::Validation(_)
            | ServiceError::Template(_)
            | ServiceError::Edit(_)
            | ServiceError::Transfer(_)
            | ServiceError::Upload(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Report(_) | ServiceError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

/// Registers every scope; shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(templates::configure_routes())
        .service(inspections::configure_routes())
        .service(reports::configure_routes())
        .service(transfer::configure_routes())
        .default_service(web::route().to(index::process));
}

pub(crate) fn load_inspection(store: &Store, id: &str) -> Result<Inspection, ServiceError> {
    store
        .inspection(id)?
        .ok_or_else(|| ServiceError::InspectionNotFound(id.to_string()))
}

pub(crate) fn require_template(store: &Store) -> Result<Template, ServiceError> {
    store.current_template()?.ok_or(ServiceError::NoTemplate)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::ReportConfig;
    use crate::store::Store;
    use actix_web::web;
    use common::model::template::Template;

    pub const TEMPLATE_JSON: &str = r#"{
        "brand": { "companyName": "Acme Safety" },
        "sections": [
            { "id": "s1", "title": "General", "items": [
                { "id": "item1", "text": "Exits clear" },
                { "id": "item2", "text": "Lighting works" }
            ]}
        ]
    }"#;

    pub fn seed_template(store: &Store) -> Template {
        let template = Template::from_json(TEMPLATE_JSON).unwrap();
        store.save_template(&template).unwrap();
        template
    }

    /// App factory for `actix_web::test::init_service`.
    macro_rules! test_app {
        ($store:expr) => {
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($store.clone()))
                .app_data(crate::services::testing::report_config())
                .configure(crate::services::configure)
        };
    }
    pub(crate) use test_app;

    pub fn report_config() -> web::Data<ReportConfig> {
        web::Data::new(crate::report::testing::font_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            ServiceError::InspectionNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ServiceError::NoTemplate.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::from(ValidationError::MissingSiteName).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::from(EditError::SlotOutOfRange(7)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::from(TemplateError::MissingSections).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Blocking("gone".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
