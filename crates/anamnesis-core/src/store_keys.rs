//! Storage key conventions.
//!
//! Pure string functions. These define the canonical layout of anamnesis
//! documents in the object store.

pub const ANAMNESIS_PREFIX: &str = "anamnesis/";

pub fn anamnesis(patient_id: &str) -> String {
    format!("{ANAMNESIS_PREFIX}{patient_id}.json")
}

/// Recover the patient id from a key produced by [`anamnesis`].
pub fn patient_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(ANAMNESIS_PREFIX)?.strip_suffix(".json")
}
