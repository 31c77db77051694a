//! # chord-search
//!
//! A library for looking up instrument chord fingerings by partial fingering.
//!
//! A query such as `b2g2` says "the b string on fret 2, the g string on fret 2,
//! anything else". `chord-search` finds stored chords that match and ranks them
//! by how close their whole fingering is to the query, preferring common chord
//! types (major, minor, 7, ...) over rare ones when the distance is equal.
//!
//! ## Features
//!
//! - **Compact keys**: `e0b2g2D2A0E0--A_major` encodes a full fingering and its name
//! - **Partial queries**: unset strings count as open
//! - **Fret distance ranking**: sum of per-string fret differences
//! - **Obscurity tie-break**: common modifiers sort before rare ones
//! - **Extensible instruments**: new instruments register a string set and modifier list
//!
//! ## Example
//!
//! ```rust
//! use chord_search::{ChordCatalog, InstrumentRegistry, SearchEngine};
//!
//! // Load the embedded catalog of common chords
//! let catalog = ChordCatalog::load_embedded().unwrap();
//!
//! // Rank every guitar chord with the b string on fret 2
//! let engine = SearchEngine::new(InstrumentRegistry::builtin(), &catalog);
//! let results = engine.find_chords("guitar", "b2").unwrap();
//!
//! for ranked in &results.chords {
//!     println!("{}: {}", ranked.fingering.name(), ranked.fingering.key());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Chord storage and the repository interface
//! - [`core`]: Fingerings, stored records, and instrument profiles
//! - [`matching`]: Fret distance, obscurity, and ranking
//! - [`parsing`]: The compact fingering key format
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based lookup

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::repository::ChordRepository;
pub use catalog::store::ChordCatalog;
pub use crate::core::fingering::{ChordRecord, Fingering, FretFilter};
pub use crate::core::instrument::{InstrumentProfile, InstrumentRegistry};
pub use crate::core::types::*;
pub use matching::engine::{ChordMatcher, SearchEngine, SearchResults};
