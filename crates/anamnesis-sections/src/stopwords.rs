//! Spanish function words excluded from search terms.
//!
//! Entries are already normalized (lower-case, no diacritics) so they compare
//! directly against normalized tokens.

use std::collections::HashSet;
use std::sync::LazyLock;

pub const STOP_WORDS: &[&str] = &[
    "a", "al", "algo", "algun", "alguna", "algunas", "alguno", "algunos", "ante", "antes", "aqui",
    "asi", "aun", "bajo", "bien", "cada", "casi", "como", "con", "contra", "cual", "cuales",
    "cuando", "de", "del", "desde", "donde", "dos", "durante", "e", "el", "ella", "ellas", "ello",
    "ellos", "en", "entre", "era", "eran", "es", "esa", "esas", "ese", "eso", "esos", "esta",
    "estaba", "estan", "estar", "estas", "este", "esto", "estos", "estoy", "fue", "fueron", "ha",
    "hace", "hacia", "han", "hasta", "hay", "he", "la", "las", "le", "les", "lo", "los", "mas",
    "me", "mi", "mis", "mucho", "muy", "nada", "ni", "no", "nos", "nosotros", "o", "otra",
    "otras", "otro", "otros", "para", "pero", "poco", "por", "porque", "que", "quien", "se",
    "sea", "segun", "ser", "si", "sido", "siempre", "sin", "sobre", "son", "su", "sus", "tambien",
    "tan", "tanto", "te", "tengo", "tiene", "tienen", "todo", "todos", "tu", "tus", "u", "un",
    "una", "unas", "uno", "unos", "usted", "ya", "yo",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}
