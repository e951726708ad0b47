//! Search-Term Extractor.
//!
//! Every string in every section is normalized and split into words. Words
//! of at least [`MIN_TOKEN_CHARS`] characters that are not stop words become
//! terms. Consecutive 2- and 3-word windows become phrase terms when long
//! enough; windows are taken both over the words as written ("dolor de
//! cabeza") and over the surviving tokens ("dolor cabeza").

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use anamnesis_core::models::section::SectionRecord;
use anamnesis_sections::stopwords::is_stop_word;

use crate::normalize::words;

pub const MIN_TOKEN_CHARS: usize = 3;
pub const MIN_TWO_WORD_CHARS: usize = 5;
pub const MIN_THREE_WORD_CHARS: usize = 8;

pub fn extract(sections: &BTreeMap<String, SectionRecord>) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    for record in sections.values() {
        for value in record.data.values() {
            let mut texts = Vec::new();
            collect_strings(value, &mut texts);
            for text in texts {
                extract_from_text(text, &mut terms);
            }
        }
    }
    terms
}

/// Add the terms found in one piece of free text to `terms`.
pub fn extract_from_text(text: &str, terms: &mut BTreeSet<String>) {
    let words = words(text);
    let tokens: Vec<String> = words
        .iter()
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS && !is_stop_word(w))
        .cloned()
        .collect();

    terms.extend(tokens.iter().cloned());
    add_phrases(&words, terms);
    add_phrases(&tokens, terms);
}

fn add_phrases(words: &[String], terms: &mut BTreeSet<String>) {
    for (size, min_chars) in [(2, MIN_TWO_WORD_CHARS), (3, MIN_THREE_WORD_CHARS)] {
        for window in words.windows(size) {
            let phrase = window.join(" ");
            if phrase.chars().count() >= min_chars {
                terms.insert(phrase);
            }
        }
    }
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
