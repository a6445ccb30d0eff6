use crate::services::ServiceError;
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::Template;
use log::{info, warn};

/// `POST /api/template`: replaces the current template with the one in the
/// request body. Nothing is written unless the document validates.
pub async fn process(store: web::Data<Store>, body: String) -> impl Responder {
    match save_template(&store, &body) {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => {
            warn!("Template rejected: {}", e);
            e.error_response()
        }
    }
}

pub fn save_template(store: &Store, source: &str) -> Result<Template, ServiceError> {
    let template = Template::from_json(source)?;
    store.save_template(&template)?;
    info!(
        "Template saved: {} sections, {} items",
        template.sections.len(),
        template.item_count()
    );
    Ok(template)
}
