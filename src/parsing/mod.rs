//! Parsers for the compact fingering keys used in URLs and on the command line.
//!
//! ## Example
//!
//! ```rust
//! use chord_search::parsing::key::decode;
//!
//! // Partial query: high e on fret 5, b on fret 6
//! let filter = decode("e5b6");
//! assert_eq!(filter.len(), 2);
//!
//! // Everything after "--" is the chord name and is not parsed
//! let filter = decode("e0b2g2D2A0E0--A_major");
//! assert_eq!(filter.len(), 6);
//! ```
//!
//! ## Key Syntax
//!
//! | Part | Example | Meaning |
//! |------|---------|---------|
//! | `<letter><digits>` | `b2` | String `b` on fret 2 |
//! | `--` | | Start of the chord name |
//! | name | `A_major` | Chord and modifier, whitespace as `_` |
//! | `all` | | No fret filter |

pub mod key;
