use thiserror::Error;

use anamnesis_core::error::CoreError;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("invalid classification pattern '{pattern}' for section '{section}': {source}")]
    InvalidPattern {
        section: String,
        pattern: String,
        source: regex::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
