use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::fingering::{ChordRecord, FretFilter, OPEN_FRET};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    /// Instrument name -> stored chords, one collection per instrument
    pub instruments: BTreeMap<String, Vec<ChordRecord>>,
}

/// Chord records grouped by instrument
#[derive(Debug, Clone, Default)]
pub struct ChordCatalog {
    instruments: BTreeMap<String, Vec<ChordRecord>>,
}

impl ChordCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/chords.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from `path` if given, otherwise the embedded catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let catalog = Self {
            instruments: data.instruments,
        };
        tracing::debug!(
            instruments = catalog.instruments.len(),
            chords = catalog.len(),
            "Loaded chord catalog"
        );
        Ok(catalog)
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            instruments: self.instruments.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Write catalog JSON to `path`
    pub fn save_to_file(&self, path: &Path) -> Result<(), CatalogError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Append a record to an instrument's collection
    pub fn add_record(&mut self, instrument: &str, record: ChordRecord) {
        self.instruments
            .entry(instrument.to_string())
            .or_default()
            .push(record);
    }

    /// All stored records for an instrument, in insertion order
    pub fn records(&self, instrument: &str) -> &[ChordRecord] {
        self.instruments
            .get(instrument)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Records for an instrument whose frets equal every filter entry
    ///
    /// Strings a record leaves unset compare as the open fret. An empty
    /// filter matches everything.
    pub fn find(&self, instrument: &str, filter: &FretFilter) -> Vec<ChordRecord> {
        self.records(instrument)
            .iter()
            .filter(|record| matches_filter(record, filter))
            .cloned()
            .collect()
    }

    /// Instruments with at least one stored collection
    pub fn instrument_names(&self) -> impl Iterator<Item = &str> {
        self.instruments.keys().map(String::as_str)
    }

    /// Total number of records across all instruments
    pub fn len(&self) -> usize {
        self.instruments.values().map(Vec::len).sum()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Unlike strict field equality, an absent record field reads as the open
// fret, so `x0` matches every record.
fn matches_filter(record: &ChordRecord, filter: &FretFilter) -> bool {
    filter.iter().all(|(string, fret)| {
        record
            .frets
            .get(string)
            .map_or(OPEN_FRET, String::as_str)
            == fret
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::key::decode;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = ChordCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.records("guitar").is_empty());
        assert_eq!(catalog.instrument_names().collect::<Vec<_>>(), vec!["guitar"]);
    }

    #[test]
    fn test_records_for_missing_instrument() {
        let catalog = ChordCatalog::load_embedded().unwrap();
        assert!(catalog.records("banjo").is_empty());
        assert!(catalog.find("banjo", &decode("all")).is_empty());
    }

    #[test]
    fn test_find_all() {
        let catalog = ChordCatalog::load_embedded().unwrap();
        let all = catalog.find("guitar", &decode("all"));
        assert_eq!(all.len(), catalog.records("guitar").len());
    }

    #[test]
    fn test_find_exact_field_match() {
        let catalog = ChordCatalog::load_embedded().unwrap();
        let found = catalog.find("guitar", &decode("b2"));
        assert!(!found.is_empty());
        assert!(found
            .iter()
            .all(|r| r.frets.get("b").map(String::as_str) == Some("2")));
    }

    #[test]
    fn test_find_unset_string_reads_as_open() {
        let mut catalog = ChordCatalog::new();
        catalog.add_record(
            "guitar",
            ChordRecord::new("E", "5").with_frets([("D", "2"), ("A", "2")]),
        );
        assert_eq!(catalog.find("guitar", &decode("e0")).len(), 1);
        assert!(catalog.find("guitar", &decode("e1")).is_empty());
    }

    #[test]
    fn test_find_unknown_string_key() {
        let mut catalog = ChordCatalog::new();
        catalog.add_record("guitar", ChordRecord::new("A", "major").with_fret("b", "2"));
        assert!(catalog.find("guitar", &decode("x5")).is_empty());
        assert_eq!(catalog.find("guitar", &decode("x0")).len(), 1);
    }

    #[test]
    fn test_add_record_preserves_order() {
        let mut catalog = ChordCatalog::new();
        assert_eq!(catalog.len(), 0);
        catalog.add_record("guitar", ChordRecord::new("A", "major"));
        catalog.add_record("guitar", ChordRecord::new("A", "minor"));
        catalog.add_record("ukulele", ChordRecord::new("C", "major"));

        assert_eq!(catalog.len(), 3);
        let guitar = catalog.records("guitar");
        assert_eq!(guitar[0].modifier, "major");
        assert_eq!(guitar[1].modifier, "minor");
    }

    #[test]
    fn test_catalog_to_json() {
        let catalog = ChordCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"instruments\""));
        assert!(json.contains("\"guitar\""));

        let reloaded = ChordCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chords.json");

        let mut catalog = ChordCatalog::new();
        catalog.add_record("guitar", ChordRecord::new("G", "major").with_fret("e", "3"));
        catalog.save_to_file(&path).unwrap();

        let loaded = ChordCatalog::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.records("guitar"), catalog.records("guitar"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ChordCatalog::load_from_file(Path::new("/nonexistent/chords.json"));
        assert!(matches!(result, Err(CatalogError::ReadError(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = ChordCatalog::from_json("{not json");
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }
}
