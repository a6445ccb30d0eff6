//! Serialises a [`PrintDocument`] into a standalone HTML page.
//!
//! The page carries its own print stylesheet and leaves pagination to the
//! browser: each section starts on a new printed page and item blocks avoid
//! splitting across pages where the browser allows it.

use common::model::response::ResultCode;
use common::print_view::{CoverBlock, ItemBlock, PrintDocument, SectionBlock};

const PRINT_CSS: &str = r#"
@page { size: A4; margin: 15mm; }
* { box-sizing: border-box; }
body { font-family: Arial, "Liberation Sans", sans-serif; color: #212121; font-size: 10pt; margin: 0; }
header.brand { display: flex; justify-content: space-between; align-items: flex-start; border-bottom: 1px solid #bdbdbd; padding-bottom: 4mm; }
header.brand .company { color: #616161; font-size: 14pt; font-weight: bold; }
header.brand h1 { font-size: 18pt; margin: 1mm 0 0; }
header.brand img.logo { max-width: 40mm; max-height: 20mm; object-fit: contain; }
dl.meta { display: grid; grid-template-columns: max-content auto; gap: 1mm 4mm; margin: 5mm 0; }
dl.meta dt { font-weight: bold; }
dl.meta dd { margin: 0; }
.summary .overall { font-size: 14pt; font-weight: bold; }
.summary .counts { color: #616161; }
.notes { white-space: pre-wrap; }
section.checklist { break-before: page; page-break-before: always; }
section.checklist h2 { font-size: 14pt; border-bottom: 1px solid #bdbdbd; padding-bottom: 2mm; }
.item { break-inside: avoid; page-break-inside: avoid; margin-bottom: 6mm; }
.item .title { display: flex; justify-content: space-between; font-weight: bold; font-size: 11pt; }
.badge { border-radius: 3mm; padding: 0.5mm 3mm; font-size: 9pt; color: #fff; }
.badge.pass { background: #2e7d32; }
.badge.fail { background: #c62828; }
.badge.na { background: #757575; }
.badge.empty { background: #fff; color: #757575; border: 1px solid #757575; }
.photos { display: grid; grid-template-columns: repeat(3, 1fr); gap: 2mm; margin-top: 2mm; }
.photos img { width: 100%; height: 35mm; object-fit: contain; border: 1px solid #e0e0e0; }
@media screen { body { max-width: 210mm; margin: 0 auto; padding: 15mm; } }
"#;

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn badge_class(status: ResultCode) -> &'static str {
    match status {
        ResultCode::Pass => "pass",
        ResultCode::Fail => "fail",
        ResultCode::Na => "na",
        ResultCode::Empty => "empty",
    }
}

pub fn render_print_html(doc: &PrintDocument) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape_html(&doc.cover.report_title),
        PRINT_CSS
    ));
    render_cover(&mut html, &doc.cover);
    for section in &doc.sections {
        render_section(&mut html, section);
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn render_cover(html: &mut String, cover: &CoverBlock) {
    html.push_str("<header class=\"brand\">\n<div>\n");
    if let Some(company) = &cover.company_name {
        html.push_str(&format!(
            "<div class=\"company\">{}</div>\n",
            escape_html(company)
        ));
    }
    html.push_str(&format!("<h1>{}</h1>\n</div>\n", escape_html(&cover.report_title)));
    if let Some(logo) = &cover.logo {
        html.push_str(&format!(
            "<img class=\"logo\" src=\"{}\" alt=\"\">\n",
            escape_html(logo)
        ));
    }
    html.push_str("</header>\n<dl class=\"meta\">\n");
    for field in &cover.meta {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            field.label,
            escape_html(&field.value)
        ));
    }
    html.push_str("</dl>\n");

    let summary = &cover.summary;
    html.push_str(&format!(
        "<div class=\"summary\">\n<div class=\"overall\">Overall status: {}</div>\n\
         <div class=\"counts\">Pass {} &middot; Fail {} &middot; N/A {} &middot; Not answered {}</div>\n</div>\n",
        summary.overall.label(),
        summary.pass,
        summary.fail,
        summary.na,
        summary.empty
    ));

    if let Some(notes) = &cover.general_notes {
        html.push_str(&format!(
            "<h3>General notes</h3>\n<div class=\"notes\">{}</div>\n",
            escape_html(notes)
        ));
    }
}

fn render_section(html: &mut String, section: &SectionBlock) {
    html.push_str(&format!(
        "<section class=\"checklist\" id=\"{}\">\n<h2>{}</h2>\n",
        escape_html(&section.id),
        escape_html(&section.title)
    ));
    for item in &section.items {
        render_item(html, item);
    }
    html.push_str("</section>\n");
}

fn render_item(html: &mut String, item: &ItemBlock) {
    html.push_str(&format!(
        "<div class=\"item\">\n<div class=\"title\"><span>{}</span><span class=\"badge {}\">{}</span></div>\n",
        escape_html(&item.text),
        badge_class(item.status),
        item.status.label()
    ));
    if let Some(notes) = &item.notes {
        html.push_str(&format!("<div class=\"notes\">{}</div>\n", escape_html(notes)));
    }
    if let Some(photos) = &item.photos {
        html.push_str("<div class=\"photos\">\n");
        for photo in photos {
            html.push_str(&format!("<img src=\"{}\" alt=\"\">\n", escape_html(photo)));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}
