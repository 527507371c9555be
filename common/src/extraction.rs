//! Extraction cache
//!
//! Holds the fields returned by the PDF extraction endpoint until the PDF-mode
//! save consumes them. Owned by the controller; nothing here outlives the page.

use crate::types::ExtractedFields;
use serde::{Deserialize, Serialize};

/// What a successful extraction does with its data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hydration {
    /// Keep the fields for a later explicit save
    #[default]
    Deferred,
    /// Write the fields straight into the visible form inputs
    Immediate,
}

impl Hydration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hydration::Deferred => "deferred",
            Hydration::Immediate => "immediate",
        }
    }
}

impl std::str::FromStr for Hydration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deferred" => Ok(Hydration::Deferred),
            "immediate" => Ok(Hydration::Immediate),
            _ => Err(format!("Unknown hydration: {}. Use deferred or immediate", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionCache {
    data: Option<ExtractedFields>,
}

impl ExtractionCache {
    /// Replace whatever a previous extraction left behind
    pub fn store(&mut self, data: ExtractedFields) {
        self.data = Some(data);
    }

    pub fn get(&self) -> Option<&ExtractedFields> {
        self.data.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    /// Owned `(key, value)` pairs for the save request, empty values omitted.
    /// `None` when nothing has been extracted yet.
    pub fn save_pairs(&self) -> Option<Vec<(&'static str, String)>> {
        self.data.as_ref().map(|data| {
            data.form_pairs()
                .into_iter()
                .map(|(field, value)| (field.as_str(), value.to_string()))
                .collect()
        })
    }
}
