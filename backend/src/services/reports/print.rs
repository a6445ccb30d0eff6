use crate::report::print_html::render_print_html;
use crate::services::{load_inspection, require_template, ServiceError};
use crate::store::Store;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::print_view::build_print_document;

/// `GET /api/reports/{id}/print`: the print view as a standalone HTML page.
pub async fn process(store: web::Data<Store>, id: web::Path<String>) -> impl Responder {
    match print_view(&store, &id) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => e.error_response(),
    }
}

pub fn print_view(store: &Store, id: &str) -> Result<String, ServiceError> {
    let inspection = load_inspection(store, id)?;
    let template = require_template(store)?;
    let document = build_print_document(&inspection, &template);
    Ok(render_print_html(&document))
}
