//! Field Classifier: assigns an unsectioned form field to a clinical section.

use std::sync::LazyLock;

use regex::Regex;

use anamnesis_sections::rules::{ClassificationRule, builtin_rules};

use crate::error::FormatError;
use crate::normalize::normalize;

#[derive(Debug, Clone)]
struct CompiledRule {
    section_id: String,
    patterns: Vec<Regex>,
}

/// An ordered list of `(section, patterns)` rules. The first section with a
/// pattern matching the normalized field name wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

static BUILTIN: LazyLock<Classifier> = LazyLock::new(|| {
    Classifier::new(&builtin_rules())
        .unwrap_or_else(|e| panic!("built-in classification rules are invalid: {e}"))
});

impl Classifier {
    /// Compile a rule table. Patterns are matched against field names that
    /// are already lower-case and free of diacritics.
    pub fn new(rules: &[ClassificationRule]) -> Result<Self, FormatError> {
        let rules = rules
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|pattern| {
                        Regex::new(pattern).map_err(|source| FormatError::InvalidPattern {
                            section: rule.section_id.clone(),
                            pattern: pattern.clone(),
                            source,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledRule {
                    section_id: rule.section_id.clone(),
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;
        Ok(Self { rules })
    }

    /// The classifier for [`anamnesis_sections::rules::CLASSIFICATION_RULES`].
    ///
    /// # Panics
    ///
    /// Panics on first use if a built-in pattern fails to compile. The table
    /// is a compile-time constant covered by tests, so a panic indicates a
    /// bug in the table itself.
    pub fn builtin() -> &'static Classifier {
        &BUILTIN
    }

    /// The section for `field_name`, or `None` when no rule matches.
    pub fn classify(&self, field_name: &str) -> Option<&str> {
        let name = normalize(field_name);
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| p.is_match(&name)))
            .map(|rule| rule.section_id.as_str())
    }

    /// Section ids in tie-break order.
    pub fn section_order(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.section_id.as_str())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
