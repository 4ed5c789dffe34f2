//! Canonical forms for the identity fields guests type by hand.
//!
//! Sheet cells and login input both pass through here, so every identity
//! comparison in the crate is normalized on both sides.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical name form: diacritics stripped, whitespace runs collapsed,
/// lowercased. Punctuation is preserved, so "O'Brien" keeps its apostrophe.
pub fn normalize_name(raw: &str) -> String {
    let stripped: String = raw.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical postal code form: uppercased with all whitespace removed.
pub fn normalize_postal(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Trims a dietary note; the literal word "none" counts as empty.
pub fn clean_dietary(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Spellings accepted as a ticked checkbox column.
pub fn is_truthy_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "x" | "checked"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_strips_diacritics_and_case() {
        assert_eq!(normalize_name("Zoë  Müller"), "zoe muller");
        assert_eq!(normalize_name("JOSÉ garcía"), "jose garcia");
    }

    #[test]
    fn name_collapses_whitespace_but_keeps_punctuation() {
        assert_eq!(normalize_name("  Jane   O'Brien \t"), "jane o'brien");
        assert_eq!(normalize_name("Mary-Anne Smith"), "mary-anne smith");
    }

    #[test]
    fn equivalent_name_spellings_agree() {
        let stored = normalize_name("Jane O'Brien");
        assert_eq!(normalize_name("jane o'brien"), stored);
        assert_eq!(normalize_name("Jané  O'Brien"), stored);
    }

    #[test]
    fn postal_uppercases_and_strips_spaces() {
        assert_eq!(normalize_postal("l6p 0b2"), "L6P0B2");
        assert_eq!(normalize_postal(" L6P\t0B2 "), "L6P0B2");
        assert_eq!(normalize_postal(""), "");
    }

    #[test]
    fn dietary_none_collapses_to_empty() {
        assert_eq!(clean_dietary("  None "), "");
        assert_eq!(clean_dietary("NONE"), "");
        assert_eq!(clean_dietary(" vegetarian "), "vegetarian");
        assert_eq!(clean_dietary("no nuts"), "no nuts");
    }

    #[test]
    fn truthy_flag_spellings() {
        for raw in ["true", "Yes", " y ", "1", "X", "CHECKED"] {
            assert!(is_truthy_flag(raw), "{raw:?} should count as invited");
        }
        for raw in ["", "no", "false", "0", "maybe"] {
            assert!(!is_truthy_flag(raw), "{raw:?} should not count as invited");
        }
    }
}
