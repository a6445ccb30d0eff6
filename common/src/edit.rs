//! Edit session for an open inspection.
//!
//! Follows an Elm-style update: an [`Edit`] message is applied to the
//! [`EditSession`] value the caller holds, producing the next session with its
//! summary recomputed. The caller persists the returned inspection; nothing
//! here keeps state between calls.

use crate::aggregate::{summarize, Summary};
use crate::error::EditError;
use crate::model::inspection::Inspection;
use crate::model::response::{ResultCode, PHOTO_SLOTS};
use crate::model::template::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user edit. Serialized with an `op` tag, e.g.
/// `{"op": "setResult", "itemId": "a1", "result": "PASS"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Edit {
    SetSiteName { value: String },
    SetInspectorName { value: String },
    SetGeneralNotes { value: String },
    SetResult { item_id: String, result: ResultCode },
    SetComment { item_id: String, comment: String },
    SetPhoto { item_id: String, slot: usize, image: String },
    RemovePhoto { item_id: String, slot: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditSession {
    pub inspection: Inspection,
    pub summary: Summary,
}

impl EditSession {
    pub fn open(inspection: Inspection, template: &Template) -> EditSession {
        let summary = summarize(&inspection, template);
        EditSession {
            inspection,
            summary,
        }
    }

    /// Next session after `edit`. On error `self` is left as it was.
    pub fn apply(
        &self,
        edit: Edit,
        template: &Template,
        now: DateTime<Utc>,
    ) -> Result<EditSession, EditError> {
        let mut inspection = self.inspection.clone();
        apply_edit(&mut inspection, edit, now)?;
        Ok(EditSession::open(inspection, template))
    }
}

/// Applies one edit in place and refreshes `updatedAt`. Every check runs
/// before the first write, so a rejected edit changes nothing.
pub fn apply_edit(
    inspection: &mut Inspection,
    edit: Edit,
    now: DateTime<Utc>,
) -> Result<(), EditError> {
    match edit {
        Edit::SetSiteName { value } => inspection.site_name = value,
        Edit::SetInspectorName { value } => inspection.inspector_name = value,
        Edit::SetGeneralNotes { value } => inspection.general_notes = value,
        Edit::SetResult { item_id, result } => {
            inspection.response_mut(&item_id)?.result = result.as_str().to_string();
        }
        Edit::SetComment { item_id, comment } => {
            inspection.response_mut(&item_id)?.comment = comment;
        }
        Edit::SetPhoto {
            item_id,
            slot,
            image,
        } => {
            check_slot(slot)?;
            if !is_inline_image(&image) {
                return Err(EditError::InvalidImage);
            }
            inspection.response_mut(&item_id)?.photos.set(slot, image)?;
        }
        Edit::RemovePhoto { item_id, slot } => {
            check_slot(slot)?;
            inspection.response_mut(&item_id)?.photos.clear(slot)?;
        }
    }
    inspection.touch(now);
    Ok(())
}

fn check_slot(slot: usize) -> Result<(), EditError> {
    if slot < PHOTO_SLOTS {
        Ok(())
    } else {
        Err(EditError::SlotOutOfRange(slot))
    }
}

/// `data:image/<subtype>;base64,<payload>` with a non-empty payload.
pub fn is_inline_image(image: &str) -> bool {
    image
        .strip_prefix("data:image/")
        .and_then(|rest| rest.split_once(";base64,"))
        .is_some_and(|(subtype, payload)| !subtype.is_empty() && !payload.is_empty())
}
