use crate::catalog::store::{CatalogError, ChordCatalog};
use crate::core::fingering::{ChordRecord, FretFilter};

/// Source of stored chords for the search engine
///
/// Implementations return raw records; missing strings are filled in
/// when records are turned into fingerings. All I/O happens here, before
/// any ranking.
pub trait ChordRepository: Send + Sync {
    /// Stored chords for `instrument` matching `filter`, possibly none
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn find_candidates(
        &self,
        instrument: &str,
        filter: &FretFilter,
    ) -> Result<Vec<ChordRecord>, CatalogError>;

    /// Store a new chord for `instrument`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn insert(&mut self, instrument: &str, record: ChordRecord) -> Result<(), CatalogError>;
}

impl ChordRepository for ChordCatalog {
    fn find_candidates(
        &self,
        instrument: &str,
        filter: &FretFilter,
    ) -> Result<Vec<ChordRecord>, CatalogError> {
        Ok(self.find(instrument, filter))
    }

    fn insert(&mut self, instrument: &str, record: ChordRecord) -> Result<(), CatalogError> {
        self.add_record(instrument, record);
        Ok(())
    }
}
