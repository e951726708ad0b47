//! anamnesis-storage
//!
//! The storage side of the formatter: a [`store::DocumentStore`] contract
//! whose writes are conditional on the stored version, an in-memory and an
//! S3 implementation, and the read-format-write save flow.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod save;
pub mod store;
