use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use anamnesis_core::models::document::{AnamnesisDocument, DocumentStatus};
use anamnesis_core::models::section::{OTHER_SECTION_ID, SectionRecord};
use anamnesis_sections::catalog::SectionCatalog;
use anamnesis_sections::rules::ClassificationRule;

use crate::assemble::{Authorship, DocumentParts, assemble};
use crate::classify::Classifier;
use crate::config::FormatterConfig;
use crate::error::FormatError;
use crate::validate::{ValidationError, validate};
use crate::{completion, search_terms, structure};

/// What to do when required fields are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Fail with [`FormatError::Validation`].
    #[default]
    Strict,
    /// Produce the document anyway, marked [`DocumentStatus::Draft`].
    Draft,
}

#[derive(Debug, Clone, Copy)]
pub struct FormatRequest<'a> {
    pub payload: &'a Value,
    /// The currently stored document for the patient, if any.
    pub prior: Option<&'a AnamnesisDocument>,
    pub author_id: &'a str,
    pub patient_id: &'a str,
    pub mode: SaveMode,
}

/// A formatted document, plus the missing required fields when it was
/// produced as a draft.
#[derive(Debug, Clone)]
pub struct FormatOutcome {
    pub document: AnamnesisDocument,
    pub validation: Option<ValidationError>,
}

/// The full formatting pipeline over one catalog and rule table.
#[derive(Debug, Clone)]
pub struct Formatter {
    catalog: SectionCatalog,
    classifier: Classifier,
    config: FormatterConfig,
}

impl Formatter {
    pub fn new(
        catalog: SectionCatalog,
        rules: &[ClassificationRule],
        config: FormatterConfig,
    ) -> Result<Self, FormatError> {
        Ok(Self {
            catalog,
            classifier: Classifier::new(rules)?,
            config,
        })
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn structure(
        &self,
        payload: &Value,
        now: jiff::Timestamp,
    ) -> BTreeMap<String, SectionRecord> {
        structure::structure(
            payload,
            &self.catalog,
            &self.classifier,
            &self.config.schema_version,
            now,
        )
    }

    /// Format a full form submission into the next version of the patient's
    /// document.
    pub fn format_and_assemble(
        &self,
        request: FormatRequest<'_>,
        now: jiff::Timestamp,
    ) -> Result<FormatOutcome, FormatError> {
        let sections = self.structure(request.payload, now);
        self.finish(
            sections,
            request.prior,
            Authorship {
                author_id: request.author_id,
                patient_id: request.patient_id,
            },
            request.mode,
            now,
        )
    }

    /// Replace a single section of `prior`, leaving the others untouched.
    ///
    /// `section_payload` holds the section's own fields, named as in
    /// [`structure::structure`]. A payload that cleans to nothing removes the
    /// section.
    pub fn update_section(
        &self,
        prior: &AnamnesisDocument,
        section_id: &str,
        section_payload: &Value,
        author_id: &str,
        mode: SaveMode,
        now: jiff::Timestamp,
    ) -> Result<FormatOutcome, FormatError> {
        if section_id != OTHER_SECTION_ID && !self.catalog.contains(section_id) {
            return Err(FormatError::UnknownSection(section_id.to_string()));
        }

        let mut sections = prior.sections.clone();
        let data = structure::section_fields(section_payload);
        if data.is_empty() {
            sections.remove(section_id);
        } else {
            sections.insert(
                section_id.to_string(),
                SectionRecord::new(section_id, &self.config.schema_version, data, now),
            );
        }

        self.finish(
            sections,
            Some(prior),
            Authorship {
                author_id,
                patient_id: &prior.metadata.patient_id,
            },
            mode,
            now,
        )
    }

    fn finish(
        &self,
        sections: BTreeMap<String, SectionRecord>,
        prior: Option<&AnamnesisDocument>,
        authorship: Authorship<'_>,
        mode: SaveMode,
        now: jiff::Timestamp,
    ) -> Result<FormatOutcome, FormatError> {
        let stats = completion::calculate(&sections, &self.catalog);
        let validation = validate(&sections, &self.catalog).err();

        let status = match (&validation, mode) {
            (None, _) => DocumentStatus::Complete,
            (Some(_), SaveMode::Draft) => DocumentStatus::Draft,
            (Some(err), SaveMode::Strict) => return Err(FormatError::Validation(err.clone())),
        };

        let search_terms = search_terms::extract(&sections);
        debug!(
            patient_id = authorship.patient_id,
            sections = sections.len(),
            search_terms = search_terms.len(),
            completion = stats.total,
            ?status,
            "formatted anamnesis"
        );

        let document = assemble(
            DocumentParts {
                sections,
                stats,
                search_terms,
                status,
            },
            prior,
            authorship,
            self.config.completion_threshold,
            now,
        )?;

        Ok(FormatOutcome {
            document,
            validation,
        })
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            catalog: SectionCatalog::builtin(),
            classifier: Classifier::default(),
            config: FormatterConfig::default(),
        }
    }
}

/// Format `payload` with the built-in catalog, stamped with the current time.
///
/// Missing required fields do not fail the call; the document comes back
/// as a [`DocumentStatus::Draft`].
pub fn format_and_assemble(
    payload: &Value,
    prior: Option<&AnamnesisDocument>,
    author_id: &str,
    patient_id: &str,
) -> Result<AnamnesisDocument, FormatError> {
    let outcome = Formatter::default().format_and_assemble(
        FormatRequest {
            payload,
            prior,
            author_id,
            patient_id,
            mode: SaveMode::Draft,
        },
        jiff::Timestamp::now(),
    )?;
    Ok(outcome.document)
}
