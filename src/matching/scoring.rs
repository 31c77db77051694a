use crate::core::fingering::Fingering;

/// Integer value of a fret string; empty or non-numeric values count as 0
#[inline]
#[must_use]
pub fn fret_value(fret: &str) -> i64 {
    fret.trim().parse().unwrap_or(0)
}

/// Fret distance: sum of absolute per-string fret differences
///
/// Iterates the strings of `a`'s instrument. Both fingerings are expected to
/// belong to the same instrument. The sum saturates at `u64::MAX`.
#[must_use]
pub fn distance(a: &Fingering, b: &Fingering) -> u64 {
    a.profile()
        .strings
        .iter()
        .map(|s| fret_value(a.fret(s)).abs_diff(fret_value(b.fret(s))))
        .fold(0, u64::saturating_add)
}

/// Position of the fingering's modifier in its instrument's commonness list
///
/// Unknown modifiers rank after every known one (the list's length).
/// Exact string match only.
#[must_use]
pub fn obscurity_score(fingering: &Fingering) -> usize {
    let modifiers = &fingering.profile().modifiers;
    modifiers
        .iter()
        .position(|m| m == fingering.modifier())
        .unwrap_or(modifiers.len())
}

/// Sort key of a candidate: fret distance first, then modifier obscurity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct RankKey {
    pub distance: u64,
    pub obscurity: usize,
}

impl RankKey {
    #[must_use]
    pub fn calculate(candidate: &Fingering, target: &Fingering) -> Self {
        Self {
            distance: distance(candidate, target),
            obscurity: obscurity_score(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fingering::{ChordRecord, FretFilter};
    use crate::core::instrument::InstrumentProfile;
    use std::sync::Arc;

    fn guitar() -> Arc<InstrumentProfile> {
        Arc::new(InstrumentProfile::guitar())
    }

    fn fingering(modifier: &str, frets: &[(&str, &str)]) -> Fingering {
        let record = ChordRecord::new("A", modifier).with_frets(frets.iter().copied());
        Fingering::from_record(&guitar(), &record)
    }

    #[test]
    fn test_fret_value() {
        assert_eq!(fret_value("0"), 0);
        assert_eq!(fret_value("12"), 12);
        assert_eq!(fret_value(""), 0);
        assert_eq!(fret_value("x"), 0);
        assert_eq!(fret_value("99999999999999999999999"), 0);
    }

    #[test]
    fn test_distance_identity() {
        let f = fingering("major", &[("D", "2"), ("g", "2"), ("b", "2")]);
        assert_eq!(distance(&f, &f), 0);
    }

    #[test]
    fn test_distance_saturates_on_huge_frets() {
        let max = i64::MAX.to_string();
        let max = max.as_str();
        let huge = fingering("major", &[("e", max), ("b", max), ("g", max)]);
        let open = Fingering::from_filter(&guitar(), &FretFilter::new());
        assert_eq!(distance(&huge, &open), u64::MAX);

        let key = RankKey::calculate(&huge, &open);
        assert_eq!(key.distance, u64::MAX);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = fingering("major", &[("D", "2"), ("g", "2"), ("b", "2")]);
        let b = fingering("minor", &[("e", "3"), ("b", "1"), ("E", "5")]);
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert_eq!(distance(&a, &b), 3 + 1 + 2 + 2 + 5);
    }

    #[test]
    fn test_distance_against_query_target() {
        let profile = guitar();
        let filter: FretFilter = [("b", "2")].into_iter().collect();
        let target = Fingering::from_filter(&profile, &filter);

        let major = fingering("major", &[("D", "2"), ("g", "2"), ("b", "2")]);
        let minor = fingering("minor", &[("D", "2"), ("g", "2"), ("b", "1")]);
        assert_eq!(distance(&major, &target), 4);
        assert_eq!(distance(&minor, &target), 5);
    }

    #[test]
    fn test_distance_non_numeric_is_zero() {
        let muted = fingering("5", &[("e", "x"), ("b", "")]);
        let open = fingering("5", &[]);
        assert_eq!(distance(&muted, &open), 0);
    }

    #[test]
    fn test_obscurity_score() {
        assert_eq!(obscurity_score(&fingering("major", &[])), 0);
        assert_eq!(obscurity_score(&fingering("minor", &[])), 1);
        assert_eq!(obscurity_score(&fingering("6add9", &[])), 21);
    }

    #[test]
    fn test_obscurity_unknown_modifier_is_list_length() {
        assert_eq!(obscurity_score(&fingering("xyz", &[])), 22);
        // No case folding
        assert_eq!(obscurity_score(&fingering("Major", &[])), 22);
    }

    #[test]
    fn test_rank_key_ordering() {
        let near_rare = RankKey {
            distance: 1,
            obscurity: 20,
        };
        let far_common = RankKey {
            distance: 2,
            obscurity: 0,
        };
        let near_common = RankKey {
            distance: 1,
            obscurity: 0,
        };
        assert!(near_common < near_rare);
        assert!(near_rare < far_common);
    }
}
