//! Chord ranking.
//!
//! This module provides the core matching functionality:
//!
//! - [`ChordMatcher`]: Orders candidate fingerings against a target fingering
//! - [`SearchEngine`]: Looks up stored chords and ranks them for a query
//! - [`RankKey`]: The (fret distance, obscurity) pair candidates are sorted by
//!
//! ## Ranking
//!
//! Candidates are sorted ascending by:
//!
//! 1. **Fret distance**: sum over the instrument's strings of the absolute
//!    difference between candidate and target frets. Non-numeric frets count as 0.
//! 2. **Obscurity**: position of the candidate's modifier in the instrument's
//!    commonness list. Unknown modifiers rank after all known ones.
//!
//! The sort is stable, so equal candidates keep repository order.
//!
//! ## Example
//!
//! ```rust
//! use chord_search::catalog::store::ChordCatalog;
//! use chord_search::core::instrument::InstrumentRegistry;
//! use chord_search::matching::engine::SearchEngine;
//!
//! let catalog = ChordCatalog::load_embedded().unwrap();
//! let engine = SearchEngine::new(InstrumentRegistry::builtin(), &catalog);
//!
//! let results = engine.find_chords("guitar", "b2").unwrap();
//! for ranked in &results.chords {
//!     println!("{} (distance {})", ranked.fingering.name(), ranked.rank.distance);
//! }
//! ```
//!
//! [`ChordMatcher`]: engine::ChordMatcher
//! [`SearchEngine`]: engine::SearchEngine
//! [`RankKey`]: scoring::RankKey

pub mod engine;
pub mod scoring;
