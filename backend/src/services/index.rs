//! Landing page served for every path outside `/api`.
//!
//! Lists stored inspections, newest first, with their overall status and
//! links to both report renderings, plus the export download.

use super::inspections::list_inspections;
use super::ServiceError;
use crate::report::print_html::escape_html;
use crate::store::Store;
use actix_web::{web, HttpResponse, ResponseError};
use common::aggregate::summarize;
use common::print_view::format_timestamp;

pub async fn process(store: web::Data<Store>) -> HttpResponse {
    match index_page(&store) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => e.error_response(),
    }
}

pub fn index_page(store: &Store) -> Result<String, ServiceError> {
    let template = store.current_template()?;
    let inspections = list_inspections(store)?;

    let mut rows = String::new();
    for inspection in &inspections {
        let status = template
            .as_ref()
            .map(|t| summarize(inspection, t).overall.label())
            .unwrap_or("-");
        let id = escape_html(&inspection.id);
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"/api/reports/{id}/print\">Print</a> \
             <a href=\"/api/reports/{id}/pdf\">PDF</a></td></tr>\n",
            escape_html(&inspection.site_name),
            escape_html(&inspection.inspector_name),
            format_timestamp(&inspection.updated_at),
            status,
        ));
    }
    if inspections.is_empty() {
        rows.push_str("<tr><td colspan=\"5\">No inspections yet.</td></tr>\n");
    }

    let template_line = match &template {
        Some(t) => format!(
            "Template: {} sections, {} items",
            t.sections.len(),
            t.item_count()
        ),
        None => "No template loaded. POST one to /api/template.".to_string(),
    };

    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>Site inspections</title>\n\
         <style>body {{ font-family: Arial, sans-serif; margin: 2rem; }} \
         table {{ border-collapse: collapse; }} \
         td, th {{ border-bottom: 1px solid #ddd; padding: 0.4rem 0.8rem; text-align: left; }}</style>\n\
         </head>\n<body>\n<h1>Site inspections</h1>\n<p>{}</p>\n\
         <p><a href=\"/api/transfer/export\">Export all</a></p>\n\
         <table>\n<tr><th>Site</th><th>Inspector</th><th>Updated</th><th>Status</th><th>Reports</th></tr>\n\
         {}</table>\n</body>\n</html>\n",
        template_line, rows
    ))
}
