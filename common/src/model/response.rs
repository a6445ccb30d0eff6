//! Per-item answers and the lookup that tolerates older record layouts.
//!
//! Two response layouts exist in stored data:
//! - current: `{ result, comment, photos }`, written by this crate;
//! - legacy: `{ status, notes, photos }`, written by older builds.
//!
//! A record is current when it carries a `result` field. [`ResponseRecord`]
//! makes that distinction explicit and [`ResponseRecord::resolve`] maps either
//! layout to a [`ResolvedResponse`].

use crate::error::EditError;
use serde::{Deserialize, Serialize};

/// Number of addressable photo slots on a response.
pub const PHOTO_SLOTS: usize = 4;

/// Strict classification of a stored `result` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "NA")]
    Na,
}

impl ResultCode {
    /// Exact match on the stored spelling; anything else counts as unanswered.
    pub fn classify(raw: &str) -> ResultCode {
        match raw {
            "PASS" => ResultCode::Pass,
            "FAIL" => ResultCode::Fail,
            "NA" => ResultCode::Na,
            _ => ResultCode::Empty,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::Empty => "",
            ResultCode::Pass => "PASS",
            ResultCode::Fail => "FAIL",
            ResultCode::Na => "NA",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResultCode::Empty => "Not answered",
            ResultCode::Pass => "Pass",
            ResultCode::Fail => "Fail",
            ResultCode::Na => "N/A",
        }
    }
}

/// Four fixed photo slots plus any surplus entries carried in by imports.
///
/// Serialized as one flat array: the four slots (`null` when empty) followed
/// by the surplus images. Only the slots are editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<String>>", into = "Vec<Option<String>>")]
pub struct PhotoSlots {
    slots: [Option<String>; PHOTO_SLOTS],
    overflow: Vec<String>,
}

impl PhotoSlots {
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.as_deref())
    }

    pub fn slots(&self) -> &[Option<String>; PHOTO_SLOTS] {
        &self.slots
    }

    pub fn set(&mut self, slot: usize, image: String) -> Result<(), EditError> {
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(EditError::SlotOutOfRange(slot))?;
        *target = Some(image);
        Ok(())
    }

    /// Empties one slot; the other slots keep their positions.
    pub fn clear(&mut self, slot: usize) -> Result<(), EditError> {
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(EditError::SlotOutOfRange(slot))?;
        *target = None;
        Ok(())
    }

    /// Present images in order: filled slots first, then surplus entries.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter_map(|s| s.as_deref())
            .chain(self.overflow.iter().map(String::as_str))
    }
}

impl From<Vec<Option<String>>> for PhotoSlots {
    fn from(entries: Vec<Option<String>>) -> Self {
        let mut photos = PhotoSlots::default();
        for (i, entry) in entries.into_iter().enumerate() {
            let entry = entry.filter(|s| !s.is_empty());
            if i < PHOTO_SLOTS {
                photos.slots[i] = entry;
            } else if let Some(image) = entry {
                photos.overflow.push(image);
            }
        }
        photos
    }
}

impl From<PhotoSlots> for Vec<Option<String>> {
    fn from(photos: PhotoSlots) -> Self {
        photos
            .slots
            .into_iter()
            .chain(photos.overflow.into_iter().map(Some))
            .collect()
    }
}

/// Current-schema response as written by this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub result: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub photos: PhotoSlots,
}

impl Response {
    pub fn code(&self) -> ResultCode {
        ResultCode::classify(&self.result)
    }
}

/// Response layout written by older builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Option<String>>,
}

/// A stored response in either layout. Deserialization tries the current
/// layout first; it only matches when a `result` field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseRecord {
    Current(Response),
    Legacy(LegacyResponse),
}

impl Default for ResponseRecord {
    fn default() -> Self {
        ResponseRecord::Current(Response::default())
    }
}

impl ResponseRecord {
    pub fn resolve(&self) -> ResolvedResponse {
        match self {
            ResponseRecord::Current(r) => ResolvedResponse {
                result: r.result.clone(),
                comment: r.comment.clone(),
                photos: r.photos.present().map(str::to_string).collect(),
            },
            ResponseRecord::Legacy(r) => ResolvedResponse {
                result: r.status.clone().unwrap_or_default(),
                comment: r.notes.clone().unwrap_or_default(),
                photos: r
                    .photos
                    .iter()
                    .flatten()
                    .filter(|s| !s.is_empty())
                    .cloned()
                    .collect(),
            },
        }
    }

    /// Rewrites a legacy record into the current layout, keeping its data.
    pub fn into_current(self) -> Response {
        match self {
            ResponseRecord::Current(r) => r,
            ResponseRecord::Legacy(r) => Response {
                result: r.status.unwrap_or_default(),
                comment: r.notes.unwrap_or_default(),
                photos: PhotoSlots::from(r.photos),
            },
        }
    }
}

/// Layout-independent view of one item's answer. `result` keeps the stored
/// spelling; renderers normalize it as they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedResponse {
    pub result: String,
    pub comment: String,
    pub photos: Vec<String>,
}

impl ResolvedResponse {
    pub fn code(&self) -> ResultCode {
        ResultCode::classify(&self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn img(n: u8) -> String {
        format!("data:image/png;base64,AA{n}")
    }

    #[test]
    fn classify_is_strict() {
        assert_eq!(ResultCode::classify("PASS"), ResultCode::Pass);
        assert_eq!(ResultCode::classify("FAIL"), ResultCode::Fail);
        assert_eq!(ResultCode::classify("NA"), ResultCode::Na);
        assert_eq!(ResultCode::classify("pass"), ResultCode::Empty);
        assert_eq!(ResultCode::classify("N/A"), ResultCode::Empty);
        assert_eq!(ResultCode::classify(""), ResultCode::Empty);
    }

    #[test]
    fn clearing_a_slot_does_not_shift_the_others() {
        let mut photos = PhotoSlots::default();
        for slot in 0..PHOTO_SLOTS {
            photos.set(slot, img(slot as u8)).unwrap();
        }

        photos.clear(2).unwrap();

        assert_eq!(photos.get(0), Some(img(0).as_str()));
        assert_eq!(photos.get(1), Some(img(1).as_str()));
        assert_eq!(photos.get(2), None);
        assert_eq!(photos.get(3), Some(img(3).as_str()));
    }

    #[test]
    fn slots_outside_range_are_rejected() {
        let mut photos = PhotoSlots::default();
        assert_eq!(photos.set(4, img(1)), Err(EditError::SlotOutOfRange(4)));
        assert_eq!(photos.clear(9), Err(EditError::SlotOutOfRange(9)));
    }

    #[test]
    fn short_arrays_pad_and_long_arrays_keep_surplus() {
        let short: PhotoSlots = serde_json::from_str(r#"["a"]"#).unwrap();
        assert_eq!(short.slots(), &[Some("a".to_string()), None, None, None]);

        let long: PhotoSlots =
            serde_json::from_str(r#"["a", null, "c", "d", "e", ""]"#).unwrap();
        assert_eq!(long.present().collect::<Vec<_>>(), vec!["a", "c", "d", "e"]);
        assert_eq!(
            serde_json::to_string(&long).unwrap(),
            r#"["a",null,"c","d","e"]"#
        );
    }

    #[test]
    fn record_with_result_field_is_current() {
        let record: ResponseRecord =
            serde_json::from_str(r#"{"result": "FAIL", "status": "PASS", "comment": "leak"}"#)
                .unwrap();
        assert!(matches!(record, ResponseRecord::Current(_)));
        let resolved = record.resolve();
        assert_eq!(resolved.result, "FAIL");
        assert_eq!(resolved.comment, "leak");
    }

    #[test]
    fn record_without_result_field_is_legacy() {
        let record: ResponseRecord = serde_json::from_str(
            r#"{"status": "PASS", "notes": "ok", "photos": ["x", null, "y", "z", "w"]}"#,
        )
        .unwrap();
        assert!(matches!(record, ResponseRecord::Legacy(_)));
        let resolved = record.resolve();
        assert_eq!(resolved.result, "PASS");
        assert_eq!(resolved.comment, "ok");
        assert_eq!(resolved.photos, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn empty_object_resolves_blank() {
        let record: ResponseRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.resolve(), ResolvedResponse::default());
    }

    #[test]
    fn legacy_upgrade_keeps_data() {
        let legacy = ResponseRecord::Legacy(LegacyResponse {
            status: Some("NA".to_string()),
            notes: Some("closed site".to_string()),
            photos: vec![Some(img(1)), None, Some(img(3))],
        });

        let current = legacy.into_current();

        assert_eq!(current.code(), ResultCode::Na);
        assert_eq!(current.comment, "closed site");
        assert_eq!(current.photos.get(0), Some(img(1).as_str()));
        assert_eq!(current.photos.get(1), None);
        assert_eq!(current.photos.get(2), Some(img(3).as_str()));
    }
}
