use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{CreativeTemplateId, TypeConstraintError};

/// Label used whenever a template id cannot be resolved against the catalog.
pub const UNKNOWN_TEMPLATE_NAME: &str = "Unknown";

/// Production bucket a creative deliverable is counted in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CreativeCategory {
    Video,
    Static,
}

impl Display for CreativeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreativeCategory::Video => write!(f, "video"),
            CreativeCategory::Static => write!(f, "static"),
        }
    }
}

impl FromStr for CreativeCategory {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "video" => Ok(CreativeCategory::Video),
            "static" => Ok(CreativeCategory::Static),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Catalog entry describing a kind of deliverable ("Reel", "Banner", ...).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreativeTemplate {
    pub id: CreativeTemplateId,
    pub name: String,
    pub description: String,
    pub active: bool,
    /// Explicit category. Older templates carry none and fall back to
    /// classification by name.
    #[serde(default)]
    pub category: Option<CreativeCategory>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCreativeTemplate {
    pub name: String,
    pub description: String,
    pub active: bool,
    pub category: Option<CreativeCategory>,
}

/// Id-indexed view of the creative template catalog.
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    templates: HashMap<CreativeTemplateId, CreativeTemplate>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<CreativeTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn get(&self, id: CreativeTemplateId) -> Option<&CreativeTemplate> {
        self.templates.get(&id)
    }

    /// Display name for the template, or [`UNKNOWN_TEMPLATE_NAME`].
    pub fn name_of(&self, id: CreativeTemplateId) -> &str {
        self.get(id)
            .map(|t| t.name.as_str())
            .unwrap_or(UNKNOWN_TEMPLATE_NAME)
    }
}
