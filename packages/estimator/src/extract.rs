//! Bedroom/bathroom extraction from model response text.
//!
//! Pure pattern matching, no I/O. A field that cannot be parsed is `None`;
//! this module never fails.

use std::sync::OnceLock;

use regex::Regex;

/// Numeric pattern to use when parsing counts.
///
/// `Integer` matches whole numbers only, so "Bathrooms: 2.5" yields a
/// missing bathroom count. `Decimal` also accepts fractional counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericMode {
    /// Match `\d+` only (default).
    #[default]
    Integer,

    /// Match `\d+` with an optional fractional part.
    Decimal,
}

/// Counts extracted from one response text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtractedFields {
    /// Bedroom count, if the text contained one
    pub bedrooms: Option<f64>,

    /// Bathroom count, if the text contained one
    pub bathrooms: Option<f64>,
}

fn bed_pattern(mode: NumericMode) -> &'static Regex {
    static INTEGER: OnceLock<Regex> = OnceLock::new();
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    match mode {
        NumericMode::Integer => {
            INTEGER.get_or_init(|| Regex::new(r"(?i)bed(?:room)?s?:?\s*(\d+)").unwrap())
        }
        NumericMode::Decimal => DECIMAL
            .get_or_init(|| Regex::new(r"(?i)bed(?:room)?s?:?\s*(\d+(?:\.\d+)?)").unwrap()),
    }
}

fn bath_pattern(mode: NumericMode) -> &'static Regex {
    static INTEGER: OnceLock<Regex> = OnceLock::new();
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    match mode {
        NumericMode::Integer => {
            INTEGER.get_or_init(|| Regex::new(r"(?i)bath(?:room)?s?:?\s*(\d+)").unwrap())
        }
        NumericMode::Decimal => DECIMAL
            .get_or_init(|| Regex::new(r"(?i)bath(?:room)?s?:?\s*(\d+(?:\.\d+)?)").unwrap()),
    }
}

fn first_count(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Extract bedroom and bathroom counts from response text.
///
/// Matches an indicator token ("bed", "bedroom", plural forms, optional
/// colon) immediately followed by a number, case-insensitively; same
/// independently for bathrooms. Only the first match per field is used.
pub fn extract(text: &str, mode: NumericMode) -> ExtractedFields {
    ExtractedFields {
        bedrooms: first_count(bed_pattern(mode), text),
        bathrooms: first_count(bath_pattern(mode), text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extracts_both_fields() {
        let fields = extract("Bedrooms: 4, Bathrooms: 2", NumericMode::Integer);
        assert_eq!(fields.bedrooms, Some(4.0));
        assert_eq!(fields.bathrooms, Some(2.0));
    }

    #[test]
    fn test_no_match_yields_missing() {
        let fields = extract("I'm not sure", NumericMode::Integer);
        assert_eq!(fields.bedrooms, None);
        assert_eq!(fields.bathrooms, None);
    }

    #[test]
    fn test_bathrooms_only() {
        let fields = extract("Bathrooms: 3", NumericMode::Integer);
        assert_eq!(fields.bedrooms, None);
        assert_eq!(fields.bathrooms, Some(3.0));
    }

    #[test]
    fn test_case_insensitive_and_short_forms() {
        assert_eq!(
            extract("beds: 2", NumericMode::Integer).bedrooms,
            Some(2.0)
        );
        assert_eq!(
            extract("BEDROOM: 1", NumericMode::Integer).bedrooms,
            Some(1.0)
        );
        assert_eq!(
            extract("bath 3", NumericMode::Integer).bathrooms,
            Some(3.0)
        );
    }

    #[test]
    fn test_number_before_indicator_does_not_match() {
        // Only indicator-then-number is recognized.
        let fields = extract("4 bedrooms and 2 baths", NumericMode::Integer);
        assert_eq!(fields.bedrooms, None);
        assert_eq!(fields.bathrooms, None);
    }

    #[test]
    fn test_first_match_wins() {
        let fields = extract("Bedrooms: 4 or maybe Bedrooms: 5", NumericMode::Integer);
        assert_eq!(fields.bedrooms, Some(4.0));
    }

    #[test]
    fn test_integer_mode_drops_fractional_part_match() {
        // "2.5" matches its leading integer; the fraction is lost.
        let fields = extract("Bathrooms: 2.5", NumericMode::Integer);
        assert_eq!(fields.bathrooms, Some(2.0));
    }

    #[test]
    fn test_decimal_mode_parses_fractional_counts() {
        let fields = extract("Bedrooms: 3, Bathrooms: 2.5", NumericMode::Decimal);
        assert_eq!(fields.bedrooms, Some(3.0));
        assert_eq!(fields.bathrooms, Some(2.5));
    }

    #[test]
    fn test_idempotent() {
        let text = "Bedrooms: 4, Bathrooms: 2";
        assert_eq!(
            extract(text, NumericMode::Integer),
            extract(text, NumericMode::Integer)
        );
    }

    proptest! {
        #[test]
        fn prop_formatted_counts_roundtrip(beds in 0u32..100, baths in 0u32..100) {
            let text = format!("Bedrooms: {}, Bathrooms: {}", beds, baths);
            let fields = extract(&text, NumericMode::Integer);
            prop_assert_eq!(fields.bedrooms, Some(f64::from(beds)));
            prop_assert_eq!(fields.bathrooms, Some(f64::from(baths)));
        }

        #[test]
        fn prop_extract_never_panics(text in ".*") {
            let a = extract(&text, NumericMode::Integer);
            let b = extract(&text, NumericMode::Integer);
            prop_assert_eq!(a, b);
        }
    }
}
