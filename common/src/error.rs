use thiserror::Error;

/// Rejected input when opening a new inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Site name is required")]
    MissingSiteName,

    #[error("Inspector name is required")]
    MissingInspectorName,
}

/// Problems found while loading a checklist template document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template is not valid JSON: {0}")]
    Json(String),

    #[error("Template must contain a `sections` array")]
    MissingSections,

    #[error("Template shape is invalid: {0}")]
    Shape(String),

    #[error("Duplicate section id `{0}`")]
    DuplicateSectionId(String),

    #[error("Duplicate item id `{0}`")]
    DuplicateItemId(String),
}

/// Reasons an edit could not be applied to an inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Item `{0}` is not part of this inspection")]
    UnknownItem(String),

    #[error("Photo slot {0} is out of range (0..4)")]
    SlotOutOfRange(usize),

    #[error("Photo must be an inline data URL image")]
    InvalidImage,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Import document is not valid JSON: {0}")]
    Json(String),

    #[error("Import document must be an object")]
    NotAnObject,

    #[error("Import document `inspections` must be an array")]
    InspectionsNotArray,

    #[error("Imported template rejected: {0}")]
    Template(#[from] TemplateError),

    #[error("Inspection record `{id}` is malformed: {reason}")]
    Record { id: String, reason: String },
}
