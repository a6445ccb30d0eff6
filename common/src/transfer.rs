//! Export/import bundle: `{ exportedAt, template, inspections[] }`.
//!
//! Import is best effort. The bundle is parsed up front (the template is
//! validated before anything is written), but inspection records are
//! classified one at a time so the caller can upsert as it goes and stop at
//! the first malformed record.

use crate::error::TransferError;
use crate::model::inspection::Inspection;
use crate::model::template::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub exported_at: DateTime<Utc>,
    pub template: Option<Template>,
    pub inspections: Vec<Inspection>,
}

impl ExportBundle {
    pub fn new(
        template: Option<Template>,
        inspections: Vec<Inspection>,
        now: DateTime<Utc>,
    ) -> ExportBundle {
        ExportBundle {
            exported_at: now,
            template,
            inspections,
        }
    }

    /// Download name for the bundle, e.g. `inspections_export_20240514T0900.json`.
    pub fn file_name(&self) -> String {
        format!(
            "inspections_export_{}.json",
            self.exported_at.format("%Y%m%dT%H%M")
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportBundle {
    pub template: Option<Template>,
    pub records: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportRecord {
    Upsert(Box<Inspection>),
    /// Record without a usable `id`.
    Skip,
}

impl ImportBundle {
    pub fn parse(source: &str) -> Result<ImportBundle, TransferError> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| TransferError::Json(e.to_string()))?;
        let Value::Object(mut doc) = value else {
            return Err(TransferError::NotAnObject);
        };

        let template = match doc.remove("template") {
            None | Some(Value::Null) => None,
            Some(t) => Some(Template::from_value(t)?),
        };
        let records = match doc.remove("inspections") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(records)) => records,
            Some(_) => return Err(TransferError::InspectionsNotArray),
        };

        Ok(ImportBundle { template, records })
    }
}

/// Decides what to do with one imported inspection record.
pub fn classify_record(record: Value) -> Result<ImportRecord, TransferError> {
    let id = match record.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => return Ok(ImportRecord::Skip),
    };
    serde_json::from_value::<Inspection>(record)
        .map(|inspection| ImportRecord::Upsert(Box::new(inspection)))
        .map_err(|e| TransferError::Record {
            id,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{apply_edit, Edit};
    use crate::error::TemplateError;
    use crate::model::inspection::fixtures::{at, inspection_for};
    use crate::model::response::ResultCode;
    use crate::model::template::fixtures::two_item_template;
    use pretty_assertions::assert_eq;

    #[test]
    fn export_then_import_restores_template_and_inspections() {
        let template = two_item_template();
        let mut first = inspection_for(&template);
        apply_edit(
            &mut first,
            Edit::SetResult {
                item_id: "item1".to_string(),
                result: ResultCode::Pass,
            },
            at(3),
        )
        .unwrap();
        apply_edit(
            &mut first,
            Edit::SetPhoto {
                item_id: "item2".to_string(),
                slot: 3,
                image: "data:image/jpeg;base64,/9j/".to_string(),
            },
            at(4),
        )
        .unwrap();
        let second = inspection_for(&template);
        let bundle = ExportBundle::new(
            Some(template.clone()),
            vec![first.clone(), second.clone()],
            at(10),
        );

        let json = serde_json::to_string(&bundle).unwrap();
        let imported = ImportBundle::parse(&json).unwrap();

        assert_eq!(imported.template, Some(template));
        let restored: Vec<Inspection> = imported
            .records
            .into_iter()
            .map(|r| match classify_record(r).unwrap() {
                ImportRecord::Upsert(i) => *i,
                ImportRecord::Skip => panic!("record skipped"),
            })
            .collect();
        assert_eq!(restored, vec![first, second]);
    }

    #[test]
    fn records_without_id_are_skipped() {
        assert_eq!(
            classify_record(serde_json::json!({"siteName": "x"})).unwrap(),
            ImportRecord::Skip
        );
        assert_eq!(
            classify_record(serde_json::json!({"id": "  "})).unwrap(),
            ImportRecord::Skip
        );
        assert_eq!(
            classify_record(serde_json::json!({"id": 42})).unwrap(),
            ImportRecord::Skip
        );
    }

    #[test]
    fn malformed_record_with_id_is_an_error() {
        let err = classify_record(serde_json::json!({"id": "abc", "siteName": 3})).unwrap_err();
        assert!(matches!(err, TransferError::Record { ref id, .. } if id == "abc"));
    }

    #[test]
    fn bundle_shape_errors() {
        assert_eq!(ImportBundle::parse("[]"), Err(TransferError::NotAnObject));
        assert_eq!(
            ImportBundle::parse(r#"{"inspections": {}}"#),
            Err(TransferError::InspectionsNotArray)
        );
        assert_eq!(
            ImportBundle::parse(r#"{"template": {"name": "x"}}"#),
            Err(TransferError::Template(TemplateError::MissingSections))
        );
        assert!(matches!(
            ImportBundle::parse("{"),
            Err(TransferError::Json(_))
        ));
    }

    #[test]
    fn missing_template_and_inspections_are_empty() {
        let bundle = ImportBundle::parse(r#"{"exportedAt": "2024-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(bundle.template, None);
        assert!(bundle.records.is_empty());
    }

    #[test]
    fn export_file_name_uses_timestamp() {
        let bundle = ExportBundle::new(None, vec![], at(7));
        assert_eq!(bundle.file_name(), "inspections_export_20240514T0907.json");
    }
}
