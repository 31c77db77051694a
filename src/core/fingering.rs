use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::instrument::InstrumentProfile;
use crate::core::types::ChordView;
use crate::parsing::key;

/// Fret value used for any string a record or query leaves unset
pub const OPEN_FRET: &str = "0";

/// A chord as stored in the catalog
///
/// Records keep the flat document shape: `chord` and `modifier` next to one
/// field per string, e.g. `{"chord": "A", "modifier": "major", "b": "2"}`.
/// Strings may be missing; they are filled in when a [`Fingering`] is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordRecord {
    #[serde(default)]
    pub chord: String,

    #[serde(default)]
    pub modifier: String,

    /// String identifier -> fret value
    #[serde(flatten)]
    pub frets: BTreeMap<String, String>,
}

impl ChordRecord {
    pub fn new(chord: impl Into<String>, modifier: impl Into<String>) -> Self {
        Self {
            chord: chord.into(),
            modifier: modifier.into(),
            frets: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_fret(mut self, string: impl Into<String>, fret: impl Into<String>) -> Self {
        self.frets.insert(string.into(), fret.into());
        self
    }

    #[must_use]
    pub fn with_frets<I, S, F>(mut self, frets: I) -> Self
    where
        I: IntoIterator<Item = (S, F)>,
        S: Into<String>,
        F: Into<String>,
    {
        for (string, fret) in frets {
            self.frets.insert(string.into(), fret.into());
        }
        self
    }
}

/// Ordered list of (string identifier, fret value) pairs
///
/// Keeps insertion order. Inserting an existing string replaces its value
/// in place, so the first occurrence decides the position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FretMap {
    entries: Vec<(String, String)>,
}

impl FretMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, string: impl Into<String>, fret: impl Into<String>) {
        let string = string.into();
        let fret = fret.into();
        match self.entries.iter_mut().find(|(s, _)| *s == string) {
            Some(entry) => entry.1 = fret,
            None => self.entries.push((string, fret)),
        }
    }

    pub fn get(&self, string: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == string)
            .map(|(_, f)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, f)| (s.as_str(), f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, F: Into<String>> FromIterator<(S, F)> for FretMap {
    fn from_iter<I: IntoIterator<Item = (S, F)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (string, fret) in iter {
            map.insert(string, fret);
        }
        map
    }
}

impl Serialize for FretMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (string, fret) in &self.entries {
            map.serialize_entry(string, fret)?;
        }
        map.end()
    }
}

/// Sparse per-string fret values extracted from a query
///
/// Empty means "no fret filter". Keys are not checked against any
/// instrument; strings an instrument does not have are ignored when scoring.
pub type FretFilter = FretMap;

/// A chord's complete set of per-string fret positions for one instrument
///
/// Always holds exactly one fret per instrument string, in the instrument's
/// fixed order.
#[derive(Debug, Clone)]
pub struct Fingering {
    profile: Arc<InstrumentProfile>,
    chord: String,
    modifier: String,
    frets: FretMap,
}

impl Fingering {
    /// Build from a stored record, defaulting missing strings to the open fret
    pub fn from_record(profile: &Arc<InstrumentProfile>, record: &ChordRecord) -> Self {
        let frets = normalize_frets(profile, |s| record.frets.get(s).map(String::as_str));
        Self {
            profile: Arc::clone(profile),
            chord: record.chord.clone(),
            modifier: record.modifier.clone(),
            frets,
        }
    }

    /// Build the virtual target fingering for a query filter (no name)
    pub fn from_filter(profile: &Arc<InstrumentProfile>, filter: &FretFilter) -> Self {
        let frets = normalize_frets(profile, |s| filter.get(s));
        Self {
            profile: Arc::clone(profile),
            chord: String::new(),
            modifier: String::new(),
            frets,
        }
    }

    /// Build from a stored record using the instrument's registered constructor
    pub fn construct(profile: &Arc<InstrumentProfile>, record: &ChordRecord) -> Self {
        (profile.constructor)(profile, record)
    }

    pub fn profile(&self) -> &InstrumentProfile {
        &self.profile
    }

    pub fn instrument(&self) -> &str {
        &self.profile.name
    }

    pub fn chord(&self) -> &str {
        &self.chord
    }

    pub fn modifier(&self) -> &str {
        &self.modifier
    }

    pub fn frets(&self) -> &FretMap {
        &self.frets
    }

    /// Fret value for a string; unknown strings read as the open fret
    pub fn fret(&self, string: &str) -> &str {
        self.frets.get(string).unwrap_or(OPEN_FRET)
    }

    /// Display name: chord and modifier joined by a space
    pub fn name(&self) -> String {
        format!("{} {}", self.chord, self.modifier)
    }

    /// Canonical lookup key, e.g. `e0b2g2D2A0E0--A_major`
    pub fn key(&self) -> String {
        key::encode(self)
    }

    /// Canonical HTML detail URL under `base_url`
    pub fn url_html(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            self.instrument(),
            self.key()
        )
    }

    /// Canonical JSON detail URL under `base_url`
    pub fn url_json(&self, base_url: &str) -> String {
        format!("{}.json", self.url_html(base_url))
    }

    /// JSON presentation of this fingering
    pub fn to_view(&self, base_url: &str) -> ChordView {
        ChordView {
            instrument: self.instrument().to_string(),
            chord: self.chord.clone(),
            modifier: self.modifier.clone(),
            url_html: self.url_html(base_url),
            url_json: self.url_json(base_url),
            tones: self.frets.clone(),
        }
    }
}

fn normalize_frets<'a>(
    profile: &InstrumentProfile,
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> FretMap {
    profile
        .strings
        .iter()
        .map(|s| (s.as_str(), lookup(s.as_str()).unwrap_or(OPEN_FRET)))
        .collect()
}
