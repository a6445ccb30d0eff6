//! Content tree for the browser print view.
//!
//! The host's print pipeline paginates this view, so the tree only fixes
//! order and conditional inclusion: a cover block, then one block per template
//! section in template order, each holding one block per item.

use crate::aggregate::{summarize, Summary};
use crate::model::inspection::Inspection;
use crate::model::response::ResultCode;
use crate::model::template::Template;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Thumbnails shown per item in the print view.
pub const MAX_THUMBNAILS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocument {
    pub cover: CoverBlock,
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverBlock {
    pub company_name: Option<String>,
    pub report_title: String,
    pub logo: Option<String>,
    pub meta: Vec<MetaField>,
    pub summary: Summary,
    pub general_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub id: String,
    pub title: String,
    pub items: Vec<ItemBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemBlock {
    pub id: String,
    pub text: String,
    pub status: ResultCode,
    /// `None` when the item has no notes.
    pub notes: Option<String>,
    /// `None` when the item has no photos; at most [`MAX_THUMBNAILS`].
    pub photos: Option<Vec<String>>,
}

/// Timestamp as printed on reports.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Meta lines shared by both report renderers.
pub fn meta_fields(inspection: &Inspection) -> Vec<MetaField> {
    vec![
        MetaField {
            label: "Site",
            value: inspection.site_name.clone(),
        },
        MetaField {
            label: "Inspector",
            value: inspection.inspector_name.clone(),
        },
        MetaField {
            label: "Created",
            value: format_timestamp(&inspection.created_at),
        },
        MetaField {
            label: "Updated",
            value: format_timestamp(&inspection.updated_at),
        },
    ]
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub fn build_print_document(inspection: &Inspection, template: &Template) -> PrintDocument {
    let cover = CoverBlock {
        company_name: template.company_name().map(str::to_string),
        report_title: template.report_title().to_string(),
        logo: template.logo().map(str::to_string),
        meta: meta_fields(inspection),
        summary: summarize(inspection, template),
        general_notes: non_blank(&inspection.general_notes),
    };

    let sections = template
        .sections
        .iter()
        .map(|section| SectionBlock {
            id: section.id.clone(),
            title: section.title.clone(),
            items: section
                .items
                .iter()
                .map(|item| {
                    let response = inspection.resolve(&item.id);
                    let photos: Vec<String> =
                        response.photos.iter().take(MAX_THUMBNAILS).cloned().collect();
                    ItemBlock {
                        id: item.id.clone(),
                        text: item.text.clone(),
                        status: response.code(),
                        notes: non_blank(&response.comment),
                        photos: (!photos.is_empty()).then_some(photos),
                    }
                })
                .collect(),
        })
        .collect();

    PrintDocument { cover, sections }
}
