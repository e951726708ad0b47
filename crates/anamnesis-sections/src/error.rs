use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("section '{0}' is defined more than once")]
    DuplicateSection(String),
}
