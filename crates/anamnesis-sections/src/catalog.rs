use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::SectionError;

/// The expected fields of one clinical section and its weight in the
/// overall completion percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionDefinition {
    pub id: String,
    pub name: String,
    /// Fields that must be non-empty for the anamnesis to be complete.
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
    /// Relative weight, not normalized.
    pub weight: u32,
}

impl SectionDefinition {
    pub fn new(id: &str, name: &str, required: &[&str], optional: &[&str], weight: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            required_fields: dedup(required.iter().copied()),
            optional_fields: dedup(
                optional
                    .iter()
                    .copied()
                    .filter(|field| !required.contains(field)),
            ),
            weight,
        }
    }

    /// Required fields followed by optional ones, each listed once.
    pub fn all_fields(&self) -> impl Iterator<Item = &str> {
        self.required_fields
            .iter()
            .chain(
                self.optional_fields
                    .iter()
                    .filter(|field| !self.required_fields.contains(field)),
            )
            .map(String::as_str)
    }

    pub fn field_count(&self) -> usize {
        self.all_fields().count()
    }

    /// The spelling used when form payloads key sections with underscores
    /// (`datos_personales` for `datos-personales`).
    pub fn alias(&self) -> String {
        self.id.replace('-', "_")
    }
}

fn dedup<'a>(fields: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for field in fields {
        if !out.iter().any(|f| f == field) {
            out.push(field.to_string());
        }
    }
    out
}

/// An ordered set of section definitions. Order matters: it is the order in
/// which sections are structured and in which missing fields are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCatalog {
    sections: Vec<SectionDefinition>,
}

impl SectionCatalog {
    pub fn new(sections: Vec<SectionDefinition>) -> Result<Self, SectionError> {
        for (i, section) in sections.iter().enumerate() {
            if sections[..i].iter().any(|s| s.id == section.id) {
                return Err(SectionError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// The catalog of every section registered in [`crate::all_sections`].
    pub fn builtin() -> Self {
        Self {
            sections: crate::all_sections()
                .iter()
                .map(|s| s.definition().clone())
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&SectionDefinition> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Like [`Self::get`], but an unknown id is an error.
    pub fn require(&self, id: &str) -> Result<&SectionDefinition, SectionError> {
        self.get(id)
            .ok_or_else(|| SectionError::UnknownSection(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionDefinition> {
        self.sections.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn total_weight(&self) -> u32 {
        self.sections.iter().map(|s| s.weight).sum()
    }
}

impl Default for SectionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
