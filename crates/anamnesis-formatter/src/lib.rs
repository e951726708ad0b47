//! anamnesis-formatter
//!
//! Turns a submitted anamnesis form into a versioned, structured document.
//! Pure and synchronous: no I/O, no logging of errors, no shared state.
//!
//! The stages, in pipeline order:
//!
//! 1. [`structure`] groups form fields into sections, using the
//!    [`classify::Classifier`] for fields that name no section, and cleans
//!    each section with [`sanitize`].
//! 2. [`completion`] scores each section and the whole form;
//!    [`validate`] checks required fields.
//! 3. [`search_terms`] extracts normalized terms and phrases.
//! 4. [`assemble`] stamps ids, timestamps and the next version.
//!
//! [`pipeline::Formatter`] runs them end to end.

pub mod assemble;
pub mod classify;
pub mod completion;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod sanitize;
pub mod search_terms;
pub mod structure;
pub mod validate;

pub use pipeline::{FormatOutcome, FormatRequest, Formatter, SaveMode, format_and_assemble};
