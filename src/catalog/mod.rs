//! Chord storage.
//!
//! Stored chords live in per-instrument collections of flat records. The
//! search engine reads them through the [`ChordRepository`] trait; the
//! bundled implementation is [`ChordCatalog`], a JSON-backed in-memory store.
//!
//! ## Embedded Catalog
//!
//! A default catalog of common open-position guitar chords is compiled into
//! the binary. Custom catalogs can be loaded from JSON files.
//!
//! ## Example
//!
//! ```rust
//! use chord_search::catalog::store::ChordCatalog;
//! use chord_search::parsing::key::decode;
//!
//! let catalog = ChordCatalog::load_embedded().unwrap();
//!
//! // Every stored guitar chord with the b string on fret 2
//! for record in catalog.find("guitar", &decode("b2")) {
//!     println!("{} {}", record.chord, record.modifier);
//! }
//! ```
//!
//! ## Catalog Format
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "created_at": "2026-10-17T00:00:00+00:00",
//!   "instruments": {
//!     "guitar": [
//!       { "chord": "A", "modifier": "major", "b": "2", "g": "2", "D": "2" }
//!     ]
//!   }
//! }
//! ```
//!
//! [`ChordRepository`]: repository::ChordRepository
//! [`ChordCatalog`]: store::ChordCatalog

pub mod repository;
pub mod store;
