//! Checklist schema: a template is an ordered list of sections, each an
//! ordered list of items. Item ids key the per-item responses of every
//! inspection built from the template, so they must be unique across the
//! whole document.

use crate::error::TemplateError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Store key of the singleton template record.
pub const CURRENT_TEMPLATE_KEY: &str = "current";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    pub sections: Vec<Section>,
}

/// Display metadata printed on report covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_title: Option<String>,
    /// Inline data URL image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(alias = "label")]
    pub text: String,
}

impl Template {
    /// Parses and validates a template source document.
    ///
    /// The document must be a JSON object with a `sections` array; anything
    /// else is rejected before the caller replaces its stored template.
    pub fn from_json(source: &str) -> Result<Template, TemplateError> {
        let value: Value =
            serde_json::from_str(source).map_err(|e| TemplateError::Json(e.to_string()))?;
        Template::from_value(value)
    }

    /// Same checks as [`Template::from_json`] for an already parsed document.
    pub fn from_value(value: Value) -> Result<Template, TemplateError> {
        if !value.get("sections").is_some_and(Value::is_array) {
            return Err(TemplateError::MissingSections);
        }
        let template: Template =
            serde_json::from_value(value).map_err(|e| TemplateError::Shape(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    fn validate(&self) -> Result<(), TemplateError> {
        let mut section_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(TemplateError::DuplicateSectionId(section.id.clone()));
            }
            for item in &section.items {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(TemplateError::DuplicateItemId(item.id.clone()));
                }
            }
        }
        Ok(())
    }

    /// All items in form order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.brand
            .as_ref()
            .and_then(|b| b.company_name.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn report_title(&self) -> &str {
        self.brand
            .as_ref()
            .and_then(|b| b.report_title.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Inspection Report")
    }

    pub fn logo(&self) -> Option<&str> {
        self.brand
            .as_ref()
            .and_then(|b| b.logo.as_deref())
            .filter(|s| !s.is_empty())
    }
}
