//! Natural-language filter-prompt parsing.
//!
//! Prompts are Spanish instructions of the form
//! `<verb> correos que incluyan <term, term, ...>`. Matching is
//! diacritic- and case-insensitive on the instruction words, but the
//! extracted terms keep their original casing and diacritics.

use mailsift_core::{Filter, FilterAction};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Shown when a prompt does not parse. The two example phrasings are
/// user-facing documentation and stay verbatim.
pub const PROMPT_HELP: &str = "No se pudo interpretar la instrucción. Ejemplos: \
\"elimina correos que incluyan reunión, proyecto\" o \
\"añade correos que incluyan viaje, reserva\".";

static REMOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:elimina|excluye|remove|delete)\s+correos\s+que\s+incluyan\s+(.+)$")
        .expect("static regex")
});

static ADD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:anade|agrega|incluye|add|include)\s+correos\s+que\s+incluyan\s+(.+)$")
        .expect("static regex")
});

/// Classify a raw prompt as an add or remove instruction and extract its
/// term list. Deterministic and total: returns `None` when no verb pattern
/// matches, and also when a verb matched but every term was empty.
pub fn parse_filter_prompt(input: &str) -> Option<Filter> {
    let original = input.trim();
    let (normalized, byte_map) = normalize_with_map(original);

    let (action, capture) = if let Some(caps) = REMOVE_RE.captures(&normalized) {
        (FilterAction::Remove, caps.get(1)?)
    } else if let Some(caps) = ADD_RE.captures(&normalized) {
        (FilterAction::Add, caps.get(1)?)
    } else {
        return None;
    };

    // Map the capture start back into the original string so the terms keep
    // their casing and diacritics.
    let start = *byte_map.get(capture.start())?;
    let terms: Vec<String> = original[start..]
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect();

    if terms.is_empty() {
        return None;
    }
    Some(Filter::new(action, terms))
}

/// NFD-decompose, drop combining marks, and lowercase, while recording for
/// every byte of the normalized output the byte offset of the original
/// character it came from.
fn normalize_with_map(input: &str) -> (String, Vec<usize>) {
    let mut normalized = String::with_capacity(input.len());
    let mut byte_map = Vec::with_capacity(input.len() + 1);

    for (offset, ch) in input.char_indices() {
        for decomposed in std::iter::once(ch).nfd() {
            if is_combining_mark(decomposed) {
                continue;
            }
            for lowered in decomposed.to_lowercase() {
                normalized.push(lowered);
                while byte_map.len() < normalized.len() {
                    byte_map.push(offset);
                }
            }
        }
    }
    // One-past-the-end entry so a capture starting at EOF still maps.
    byte_map.push(input.len());
    (normalized, byte_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_prompt_extracts_terms_with_diacritics_preserved() {
        let filter = parse_filter_prompt("elimina correos que incluyan reunión, proyecto")
            .expect("should parse");
        assert_eq!(filter.action, FilterAction::Remove);
        assert_eq!(filter.terms, vec!["reunión", "proyecto"]);
    }

    #[test]
    fn add_prompt_with_accented_verb_parses() {
        let filter =
            parse_filter_prompt("añade correos que incluyan viaje, reserva").expect("should parse");
        assert_eq!(filter.action, FilterAction::Add);
        assert_eq!(filter.terms, vec!["viaje", "reserva"]);
    }

    #[test]
    fn unrelated_text_returns_none() {
        assert!(parse_filter_prompt("hola mundo").is_none());
    }

    #[test]
    fn verb_without_terms_returns_none() {
        assert!(parse_filter_prompt("elimina correos que incluyan ,, ").is_none());
    }

    #[test]
    fn english_verbs_are_accepted() {
        let filter =
            parse_filter_prompt("delete correos que incluyan spam").expect("should parse");
        assert_eq!(filter.action, FilterAction::Remove);
        assert_eq!(filter.terms, vec!["spam"]);
    }

    #[test]
    fn uppercase_and_padding_are_tolerated() {
        let filter = parse_filter_prompt("  AGREGA correos QUE incluyan Facturas 2024  ")
            .expect("should parse");
        assert_eq!(filter.action, FilterAction::Add);
        assert_eq!(filter.terms, vec!["Facturas 2024"]);
    }

    #[test]
    fn terms_keep_original_casing() {
        let filter = parse_filter_prompt("incluye correos que incluyan Reunión Anual, IVA")
            .expect("should parse");
        assert_eq!(filter.terms, vec!["Reunión Anual", "IVA"]);
    }

    #[test]
    fn empty_pieces_between_commas_are_dropped() {
        let filter = parse_filter_prompt("elimina correos que incluyan a, , b")
            .expect("should parse");
        assert_eq!(filter.terms, vec!["a", "b"]);
    }

    #[test]
    fn normalization_map_points_back_into_the_original() {
        let (normalized, map) = normalize_with_map("Añade X");
        assert_eq!(normalized, "anade x");
        // The 'x' sits after the multibyte 'ñ' in the original.
        let x_pos = normalized.find('x').unwrap();
        assert_eq!(&"Añade X"[map[x_pos]..], "X");
    }

    #[test]
    fn help_text_preserves_both_documented_examples() {
        assert!(PROMPT_HELP.contains("elimina correos que incluyan reunión, proyecto"));
        assert!(PROMPT_HELP.contains("añade correos que incluyan viaje, reserva"));
    }
}
