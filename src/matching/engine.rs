use std::sync::Arc;
use thiserror::Error;

use crate::catalog::repository::ChordRepository;
use crate::catalog::store::CatalogError;
use crate::core::fingering::{ChordRecord, Fingering, FretFilter};
use crate::core::instrument::{InstrumentProfile, InstrumentRegistry};
use crate::core::types::CoreError;
use crate::matching::scoring::RankKey;
use crate::parsing::key;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A candidate together with its sort key
#[derive(Debug, Clone)]
pub struct RankedChord {
    pub fingering: Fingering,
    pub rank: RankKey,
}

/// Ranks candidate fingerings against a target fingering
pub struct ChordMatcher;

impl ChordMatcher {
    /// Candidates with their sort keys, ordered by (fret distance, obscurity)
    ///
    /// The sort is stable: candidates with equal keys keep their input order.
    pub fn score(candidates: Vec<Fingering>, target: &Fingering) -> Vec<RankedChord> {
        let mut ranked: Vec<RankedChord> = candidates
            .into_iter()
            .map(|fingering| RankedChord {
                rank: RankKey::calculate(&fingering, target),
                fingering,
            })
            .collect();
        ranked.sort_by_key(|r| r.rank);
        ranked
    }

    /// Candidates ordered by (fret distance, obscurity)
    pub fn rank(candidates: Vec<Fingering>, target: &Fingering) -> Vec<Fingering> {
        Self::score(candidates, target)
            .into_iter()
            .map(|r| r.fingering)
            .collect()
    }
}

/// Configuration for the search engine
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Maximum number of ranked chords to return (all if unset)
    pub limit: Option<usize>,
}

/// Outcome of one chord search
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub profile: Arc<InstrumentProfile>,
    /// Decoded query, echoed for presentation
    pub filter: FretFilter,
    /// Virtual fingering built from the filter
    pub target: Fingering,
    pub chords: Vec<RankedChord>,
}

impl SearchResults {
    pub fn fingerings(&self) -> impl Iterator<Item = &Fingering> {
        self.chords.iter().map(|r| &r.fingering)
    }
}

/// Repository lookup followed by ranking
pub struct SearchEngine<'a, R: ChordRepository + ?Sized> {
    registry: &'a InstrumentRegistry,
    repository: &'a R,
    config: SearchConfig,
}

impl<'a, R: ChordRepository + ?Sized> SearchEngine<'a, R> {
    /// Create a new search engine with default configuration
    pub fn new(registry: &'a InstrumentRegistry, repository: &'a R) -> Self {
        Self {
            registry,
            repository,
            config: SearchConfig::default(),
        }
    }

    /// Create a new search engine with custom configuration
    pub fn with_config(
        registry: &'a InstrumentRegistry,
        repository: &'a R,
        config: SearchConfig,
    ) -> Self {
        Self {
            registry,
            repository,
            config,
        }
    }

    /// Decode `query` and rank the matching stored chords
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Core` for an unknown instrument and
    /// `SearchError::Catalog` if the repository fails.
    pub fn find_chords(&self, instrument: &str, query: &str) -> Result<SearchResults, SearchError> {
        self.search(instrument, key::decode(query))
    }

    /// Rank the stored chords matching an already decoded filter
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Core` for an unknown instrument and
    /// `SearchError::Catalog` if the repository fails.
    pub fn search(&self, instrument: &str, filter: FretFilter) -> Result<SearchResults, SearchError> {
        let profile = Arc::clone(self.registry.lookup(instrument)?);

        let records = self.repository.find_candidates(instrument, &filter)?;
        tracing::debug!(
            instrument,
            filter = filter.len(),
            candidates = records.len(),
            "Ranking candidates"
        );

        let candidates: Vec<Fingering> = records
            .iter()
            .map(|record| Fingering::construct(&profile, record))
            .collect();
        let target = Fingering::from_filter(&profile, &filter);

        let mut chords = ChordMatcher::score(candidates, &target);
        if let Some(limit) = self.config.limit {
            chords.truncate(limit);
        }

        Ok(SearchResults {
            profile,
            filter,
            target,
            chords,
        })
    }
}

/// Store a chord after checking the instrument is registered
///
/// # Errors
///
/// Returns `SearchError::Core` for an unknown instrument and
/// `SearchError::Catalog` if the repository fails.
pub fn insert_chord<R: ChordRepository + ?Sized>(
    registry: &InstrumentRegistry,
    repository: &mut R,
    instrument: &str,
    record: ChordRecord,
) -> Result<(), SearchError> {
    registry.lookup(instrument)?;
    tracing::info!(
        instrument,
        chord = %record.chord,
        modifier = %record.modifier,
        "Inserting chord"
    );
    repository.insert(instrument, record)?;
    Ok(())
}
