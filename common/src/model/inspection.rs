use crate::error::{EditError, ValidationError};
use crate::model::response::{ResolvedResponse, Response, ResponseRecord};
use crate::model::template::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One filled-in checklist.
///
/// `responses` is a snapshot of the template's item ids taken at creation;
/// later template edits never add or remove keys. `legacy_items` is the
/// alternate top-level map (`items`) older builds stored responses under and
/// is only read, never written, by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub site_name: String,
    pub inspector_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub general_notes: String,
    #[serde(default)]
    pub responses: BTreeMap<String, ResponseRecord>,
    #[serde(default, rename = "items", skip_serializing_if = "BTreeMap::is_empty")]
    pub legacy_items: BTreeMap<String, ResponseRecord>,
}

/// Metadata supplied when opening a new inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInspection {
    pub site_name: String,
    pub inspector_name: String,
    #[serde(default)]
    pub general_notes: String,
}

impl Inspection {
    pub fn create(
        new: NewInspection,
        template: &Template,
        now: DateTime<Utc>,
    ) -> Result<Inspection, ValidationError> {
        let site_name = new.site_name.trim();
        if site_name.is_empty() {
            return Err(ValidationError::MissingSiteName);
        }
        let inspector_name = new.inspector_name.trim();
        if inspector_name.is_empty() {
            return Err(ValidationError::MissingInspectorName);
        }

        let responses = template
            .items()
            .map(|item| (item.id.clone(), ResponseRecord::default()))
            .collect();

        Ok(Inspection {
            id: Uuid::new_v4().to_string(),
            site_name: site_name.to_string(),
            inspector_name: inspector_name.to_string(),
            created_at: now,
            updated_at: now,
            general_notes: new.general_notes,
            responses,
            legacy_items: BTreeMap::new(),
        })
    }

    /// Looks an item's answer up in fixed precedence: `responses`, then the
    /// legacy `items` map, then a blank answer.
    pub fn resolve(&self, item_id: &str) -> ResolvedResponse {
        self.responses
            .get(item_id)
            .or_else(|| self.legacy_items.get(item_id))
            .map(ResponseRecord::resolve)
            .unwrap_or_default()
    }

    /// Mutable current-layout response for an item, migrating a legacy record
    /// (or one found only under `items`) into `responses` first.
    pub(crate) fn response_mut(&mut self, item_id: &str) -> Result<&mut Response, EditError> {
        if !self.responses.contains_key(item_id) {
            let record = self
                .legacy_items
                .remove(item_id)
                .ok_or_else(|| EditError::UnknownItem(item_id.to_string()))?;
            self.responses.insert(item_id.to_string(), record);
        }

        let record = self
            .responses
            .get_mut(item_id)
            .ok_or_else(|| EditError::UnknownItem(item_id.to_string()))?;
        if let ResponseRecord::Legacy(_) = record {
            *record = ResponseRecord::Current(std::mem::take(record).into_current());
        }
        match record {
            ResponseRecord::Current(response) => Ok(response),
            ResponseRecord::Legacy(_) => Err(EditError::UnknownItem(item_id.to_string())),
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::model::response::{LegacyResponse, ResultCode};
    use crate::model::template::fixtures::two_item_template;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_snapshots_blank_response_per_item() {
        let template = two_item_template();
        let inspection = inspection_for(&template);

        assert_eq!(
            inspection.responses.keys().collect::<Vec<_>>(),
            vec!["item1", "item2"]
        );
        assert!(inspection
            .responses
            .values()
            .all(|r| r.resolve() == ResolvedResponse::default()));
        assert_eq!(inspection.created_at, inspection.updated_at);
        assert!(Uuid::parse_str(&inspection.id).is_ok());
    }

    #[test]
    fn create_rejects_blank_names() {
        let template = two_item_template();
        let missing_site = NewInspection {
            site_name: "   ".to_string(),
            inspector_name: "Ana".to_string(),
            general_notes: String::new(),
        };
        assert_eq!(
            Inspection::create(missing_site, &template, at(0)),
            Err(ValidationError::MissingSiteName)
        );

        let missing_inspector = NewInspection {
            site_name: "Depot".to_string(),
            inspector_name: String::new(),
            general_notes: String::new(),
        };
        assert_eq!(
            Inspection::create(missing_inspector, &template, at(0)),
            Err(ValidationError::MissingInspectorName)
        );
    }

    #[test]
    fn ids_are_not_reused() {
        let template = two_item_template();
        assert_ne!(inspection_for(&template).id, inspection_for(&template).id);
    }

    #[test]
    fn resolve_prefers_responses_over_legacy_items() {
        let template = two_item_template();
        let mut inspection = inspection_for(&template);
        answer(&mut inspection, "item1", "PASS");
        inspection.legacy_items.insert(
            "item1".to_string(),
            ResponseRecord::Legacy(LegacyResponse {
                status: Some("FAIL".to_string()),
                ..Default::default()
            }),
        );
        inspection.legacy_items.insert(
            "old".to_string(),
            ResponseRecord::Legacy(LegacyResponse {
                status: Some("NA".to_string()),
                notes: Some("from v1".to_string()),
                photos: vec![],
            }),
        );

        assert_eq!(inspection.resolve("item1").code(), ResultCode::Pass);
        assert_eq!(inspection.resolve("old").code(), ResultCode::Na);
        assert_eq!(inspection.resolve("old").comment, "from v1");
        assert_eq!(inspection.resolve("missing"), ResolvedResponse::default());
    }

    #[test]
    fn editing_a_legacy_only_item_migrates_it() {
        let template = two_item_template();
        let mut inspection = inspection_for(&template);
        inspection.legacy_items.insert(
            "old".to_string(),
            ResponseRecord::Legacy(LegacyResponse {
                status: Some("PASS".to_string()),
                notes: Some("kept".to_string()),
                photos: vec![],
            }),
        );

        inspection.response_mut("old").unwrap().comment.push_str(" and edited");

        assert!(inspection.legacy_items.is_empty());
        assert_eq!(inspection.resolve("old").comment, "kept and edited");
        assert_eq!(inspection.resolve("old").code(), ResultCode::Pass);
    }

    #[test]
    fn reads_stored_json_with_items_map() {
        let inspection: Inspection = serde_json::from_str(
            r#"{
                "id": "abc",
                "siteName": "Yard",
                "inspectorName": "Lee",
                "createdAt": "2023-01-02T03:04:05Z",
                "updatedAt": "2023-01-02T03:04:05Z",
                "items": {"q1": {"status": "FAIL", "notes": "rust"}}
            }"#,
        )
        .unwrap();

        assert!(inspection.responses.is_empty());
        assert_eq!(inspection.resolve("q1").result, "FAIL");
        assert_eq!(inspection.general_notes, "");
    }
}
