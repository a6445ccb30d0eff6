//! # Report Renderer
//!
//! Two ways to turn an inspection into something printable:
//!
//! - **Print view** ([`print_html`]): the browser paginates a self-contained
//!   HTML page built from `common::print_view`.
//! - **Direct PDF** ([`generate_pdf`]): pagination is computed here and the
//!   result drawn with genpdf.
//!
//! ## PDF workflow
//!
//! 1. Load the configured font family. Without one nothing can be drawn and
//!    generation aborts before any work.
//! 2. Plan the pages ([`layout::plan_report`]), measuring text with the
//!    glyph widths of that font.
//! 3. Prepare every planned image in parallel ([`photos::prepare_images`]).
//! 4. Build one genpdf element per planned page and render into memory.
//!
//! Rendering only reads the inspection; stored data is never touched.

pub mod draw;
pub mod filename;
pub mod geometry;
pub mod layout;
pub mod photos;
pub mod print_html;
pub mod text;

use crate::config::ReportConfig;
use common::model::inspection::Inspection;
use common::model::template::Template;
use genpdf::fonts::{FontData, FontFamily};
use log::{info, warn};
use std::path::PathBuf;
use text::FontMetrics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No usable font family ({families}) in {}", dir.display())]
    RendererUnavailable { dir: PathBuf, families: String },

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// A rendered report and the name it should be downloaded under.
#[derive(Debug)]
pub struct PdfReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

fn load_font(config: &ReportConfig) -> Result<FontFamily<FontData>, ReportError> {
    for family in &config.font_families {
        match genpdf::fonts::from_files(&config.fonts_dir, family, None) {
            Ok(fonts) => return Ok(fonts),
            Err(e) => warn!("Font family {} unavailable: {}", family, e),
        }
    }
    Err(ReportError::RendererUnavailable {
        dir: config.fonts_dir.clone(),
        families: config.font_families.join(", "),
    })
}

pub fn generate_pdf(
    inspection: &Inspection,
    template: &Template,
    config: &ReportConfig,
) -> Result<PdfReport, ReportError> {
    let font_family = load_font(config)?;
    let file_name = filename::report_file_name(&inspection.site_name);

    let metrics = FontMetrics::new(font_family.clone());
    let plan = layout::plan_report(inspection, template, &metrics);
    let page_count = plan.pages.len();
    let prepared = photos::prepare_images(&plan.images);
    let pages = draw::build_pages(plan, &prepared, &metrics);

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("{} - {}", template.report_title(), inspection.site_name));
    doc.set_paper_size(genpdf::PaperSize::A4);
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(0);
    doc.set_page_decorator(decorator);
    draw::push_pages(&mut doc, pages);

    let mut bytes = Vec::new();
    doc.render(&mut bytes)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    // temp PNGs in `prepared` are removed once it drops here

    info!(
        "Rendered {} ({} pages, {} bytes)",
        file_name,
        page_count,
        bytes.len()
    );
    Ok(PdfReport { file_name, bytes })
}
