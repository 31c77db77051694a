//! Core data types for chord lookup.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Fingering`]: A chord's complete per-string fret positions for one instrument
//! - [`ChordRecord`]: A chord as stored in the catalog, with any subset of strings
//! - [`FretFilter`]: A sparse, partially specified fingering used as a search target
//! - [`InstrumentProfile`], [`InstrumentRegistry`]: Static per-instrument knowledge
//! - [`CoreError`], [`ChordView`]: Error and presentation types
//!
//! ## String Naming
//!
//! Strings are identified by a single character. Standard guitar uses
//! lowercase for the three high strings and uppercase for the three low ones:
//!
//! | Order | e | b | g | D | A | E |
//! |-------|---|---|---|---|---|---|
//! | Pitch | high E | B | G | D | A | low E |
//!
//! Identifiers are case-sensitive: `e` and `E` are different strings.
//!
//! [`Fingering`]: fingering::Fingering
//! [`ChordRecord`]: fingering::ChordRecord
//! [`FretFilter`]: fingering::FretFilter
//! [`InstrumentProfile`]: instrument::InstrumentProfile
//! [`InstrumentRegistry`]: instrument::InstrumentRegistry
//! [`CoreError`]: types::CoreError
//! [`ChordView`]: types::ChordView

pub mod fingering;
pub mod instrument;
pub mod types;
