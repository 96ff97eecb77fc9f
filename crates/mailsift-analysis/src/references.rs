use regex::Regex;
use std::sync::LazyLock;

// Reasoning text quotes message ids as bare 64-hex words, optionally inside
// single or double quotes. Word boundaries keep longer hex runs out.
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9a-f]{64}\b").expect("static regex"));

/// Message identifiers embedded in deep-analysis reasoning text, in order of
/// appearance, deduplicated.
pub fn find_references(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for found in REFERENCE_RE.find_iter(text) {
        let id = found.as_str().to_string();
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
