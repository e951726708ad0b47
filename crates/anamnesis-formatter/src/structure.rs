//! Section Structurer: groups a flat or nested form payload into sections.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use anamnesis_core::models::section::{OTHER_SECTION_ID, SectionRecord};
use anamnesis_sections::catalog::SectionCatalog;

use crate::classify::Classifier;
use crate::normalize::normalize;
use crate::sanitize;

/// Group `form_data` into sanitized section records.
///
/// Fields are gathered in three passes, and a field already present in a
/// section is never overwritten by a later pass:
///
/// 1. the object nested under a section's id or underscore alias
///    (`"datos-personales"` / `"datos_personales"`); the catch-all `otros`
///    is accepted here too;
/// 2. top-level `<id>_<field>` / `<alias>_<field>` keys of catalog sections,
///    with the prefix stripped;
/// 3. every remaining top-level key, classified by field name, with
///    unmatched keys landing in `otros`.
///
/// Field names are stored normalized (lower-case, no diacritics) so that
/// `"Sueño"` fills the `sueno` field. Sections that are empty after
/// cleaning are left out.
pub fn structure(
    form_data: &Value,
    catalog: &SectionCatalog,
    classifier: &Classifier,
    schema_version: &str,
    now: jiff::Timestamp,
) -> BTreeMap<String, SectionRecord> {
    let Some(form) = form_data.as_object() else {
        return BTreeMap::new();
    };

    let mut raw: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();
    let mut consumed: HashSet<&str> = HashSet::new();

    let nested_targets = catalog
        .iter()
        .map(|def| (def.id.clone(), def.alias()))
        .chain(std::iter::once((
            OTHER_SECTION_ID.to_string(),
            OTHER_SECTION_ID.to_string(),
        )));
    for (id, alias) in nested_targets {
        let nested = [&id, &alias]
            .into_iter()
            .find_map(|key| form.get_key_value(key.as_str()))
            .and_then(|(key, value)| value.as_object().map(|obj| (key, obj)));

        if let Some((key, obj)) = nested {
            consumed.insert(key.as_str());
            insert_fields(raw.entry(id).or_default(), obj);
        }
    }

    for def in catalog.iter() {
        let prefixes = [format!("{}_", def.id), format!("{}_", def.alias())];
        for (key, value) in form {
            if consumed.contains(key.as_str()) {
                continue;
            }
            let name = normalize(key);
            let field = prefixes
                .iter()
                .find_map(|prefix| name.strip_prefix(prefix.as_str()))
                .filter(|field| !field.is_empty());
            if let Some(field) = field {
                consumed.insert(key.as_str());
                raw.entry(def.id.clone())
                    .or_default()
                    .entry(field.to_string())
                    .or_insert_with(|| value.clone());
            }
        }
    }

    for (key, value) in form {
        if consumed.contains(key.as_str()) {
            continue;
        }
        let section = classifier.classify(key).unwrap_or(OTHER_SECTION_ID);
        raw.entry(section.to_string())
            .or_default()
            .entry(normalize(key))
            .or_insert_with(|| value.clone());
    }

    raw.into_iter()
        .filter_map(|(id, data)| {
            let cleaned = sanitize::clean_map(&data);
            (!cleaned.is_empty())
                .then(|| (id.clone(), SectionRecord::new(&id, schema_version, cleaned, now)))
        })
        .collect()
}

/// The fields of a single section's payload, with normalized names, cleaned.
/// Anything other than an object yields no fields.
pub fn section_fields(section_payload: &Value) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    if let Some(obj) = section_payload.as_object() {
        insert_fields(&mut fields, obj);
    }
    sanitize::clean_map(&fields)
}

// On a collision between spellings ("sueno", "sueño"), the key that sorts
// first wins.
fn insert_fields(fields: &mut BTreeMap<String, Value>, obj: &Map<String, Value>) {
    for (key, value) in obj {
        fields
            .entry(normalize(key))
            .or_insert_with(|| value.clone());
    }
}
