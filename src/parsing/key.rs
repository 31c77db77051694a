//! Compact textual fingering keys as used in URLs.
//!
//! A key lists every string followed by its fret, then `--`, then the chord
//! name with whitespace runs replaced by underscores:
//!
//! ```text
//! e0b2g2D2A0E0--A_major
//! ```
//!
//! Decoding only reads the fret part. Queries may be partial (`b2`, `e5b6`).

use regex::Regex;
use std::sync::LazyLock;

use crate::core::fingering::{Fingering, FretFilter};

/// Separates the fret part of a key from the chord name
pub const NAME_SEPARATOR: &str = "--";

/// Query token meaning "no fret filter"
pub const MATCH_ALL: &str = "all";

static STRING_FRET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z])(\d+)").expect("valid string/fret pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Decode query text into a sparse fret filter.
///
/// `all` yields an empty filter. Otherwise every `<letter><digits>` run
/// before the first `--` becomes an entry; later runs for the same letter
/// overwrite earlier ones. Anything else is ignored. No instrument is taken:
/// letters are not checked against any instrument's strings. Callers pair
/// the filter with a profile afterwards.
///
/// # Examples
///
/// ```
/// use chord_search::parsing::key::decode;
///
/// let filter = decode("e5b6--E_major");
/// assert_eq!(filter.get("e"), Some("5"));
/// assert_eq!(filter.get("b"), Some("6"));
/// assert!(decode("all").is_empty());
/// ```
#[must_use]
pub fn decode(text: &str) -> FretFilter {
    if text == MATCH_ALL {
        return FretFilter::new();
    }

    let frets = text.split(NAME_SEPARATOR).next().unwrap_or_default();
    STRING_FRET
        .captures_iter(frets)
        .map(|caps| {
            let (_, [string, fret]) = caps.extract();
            (string, fret)
        })
        .collect()
}

/// Encode a fingering as its canonical key.
#[must_use]
pub fn encode(fingering: &Fingering) -> String {
    let mut key: String = fingering
        .profile()
        .strings
        .iter()
        .map(|s| format!("{s}{}", fingering.fret(s)))
        .collect();
    key.push_str(NAME_SEPARATOR);
    key.push_str(&WHITESPACE.replace_all(&fingering.name(), "_"));
    key
}

/// Parse a complete fret spec such as `e0b2g2D2A0E0` for record entry.
///
/// Same scanning rules as [`decode`], but `all` has no special meaning.
#[must_use]
pub fn parse_frets(text: &str) -> FretFilter {
    STRING_FRET
        .captures_iter(text)
        .map(|caps| {
            let (_, [string, fret]) = caps.extract();
            (string, fret)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fingering::ChordRecord;
    use crate::core::instrument::InstrumentProfile;
    use std::sync::Arc;

    fn guitar() -> Arc<InstrumentProfile> {
        Arc::new(InstrumentProfile::guitar())
    }

    #[test]
    fn test_decode_all_is_empty() {
        assert!(decode("all").is_empty());
    }

    #[test]
    fn test_decode_empty_is_empty() {
        assert!(decode("").is_empty());
        assert!(decode("--A_major").is_empty());
    }

    #[test]
    fn test_decode_pairs() {
        let filter = decode("e5b6");
        assert_eq!(filter.iter().collect::<Vec<_>>(), vec![("e", "5"), ("b", "6")]);
    }

    #[test]
    fn test_decode_ignores_name_suffix() {
        let filter = decode("b2--A7_sus");
        assert_eq!(filter.iter().collect::<Vec<_>>(), vec![("b", "2")]);
    }

    #[test]
    fn test_decode_last_match_wins() {
        let filter = decode("e1b2e3");
        assert_eq!(filter.get("e"), Some("3"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_decode_multi_digit_frets() {
        let filter = decode("e12A10");
        assert_eq!(filter.get("e"), Some("12"));
        assert_eq!(filter.get("A"), Some("10"));
    }

    #[test]
    fn test_decode_skips_garbage() {
        let filter = decode("??b2;;x&g");
        assert_eq!(filter.iter().collect::<Vec<_>>(), vec![("b", "2")]);
    }

    #[test]
    fn test_decode_keeps_unknown_letters() {
        let filter = decode("x5");
        assert_eq!(filter.get("x"), Some("5"));
    }

    #[test]
    fn test_decode_all_only_when_exact() {
        // "all" inside a longer token is just text: "l" has no digits after it
        assert!(decode("all.json").is_empty());
        assert_eq!(decode("allb3").get("l"), None);
        assert_eq!(decode("allb3").get("b"), Some("3"));
    }

    #[test]
    fn test_encode_key_format() {
        let record = ChordRecord::new("A", "major").with_frets([
            ("E", "0"),
            ("A", "0"),
            ("D", "2"),
            ("g", "2"),
            ("b", "2"),
            ("e", "0"),
        ]);
        let fingering = Fingering::from_record(&guitar(), &record);
        assert_eq!(encode(&fingering), "e0b2g2D2A0E0--A_major");
    }

    #[test]
    fn test_encode_collapses_whitespace_runs() {
        let record = ChordRecord::new("C", "  add9 \t x");
        let fingering = Fingering::from_record(&guitar(), &record);
        assert_eq!(encode(&fingering), "e0b0g0D0A0E0--C_add9_x");
    }

    #[test]
    fn test_decode_encode_round_trip_frets() {
        let record = ChordRecord::new("F", "maj7").with_frets([
            ("e", "0"),
            ("b", "1"),
            ("g", "2"),
            ("D", "3"),
            ("A", "12"),
            ("E", "1"),
        ]);
        let profile = guitar();
        let fingering = Fingering::from_record(&profile, &record);
        let decoded = decode(&encode(&fingering));
        assert_eq!(&decoded, fingering.frets());
    }

    #[test]
    fn test_parse_frets_treats_all_as_text() {
        assert!(parse_frets("all").is_empty());
        assert_eq!(parse_frets("e0b2").len(), 2);
    }
}
