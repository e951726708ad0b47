//! anamnesis-cli
//!
//! Config loading and the offline commands behind the `anamnesis` binary.

pub mod commands;
pub mod config;
