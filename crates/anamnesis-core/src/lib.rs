//! anamnesis-core
//!
//! Pure domain types for structured anamnesis (medical history) records and
//! the storage key conventions. No I/O; this is the shared vocabulary of the
//! formatter, the storage layer and the CLI.

pub mod error;
pub mod models;
pub mod store_keys;
