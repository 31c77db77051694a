use serde::Serialize;
use thiserror::Error;

use crate::core::fingering::FretMap;

/// Conditions the chord core reports to its callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),
}

/// JSON presentation of a ranked fingering
#[derive(Debug, Clone, Serialize)]
pub struct ChordView {
    pub instrument: String,
    pub chord: String,
    pub modifier: String,
    pub url_html: String,
    pub url_json: String,
    /// Full fret mapping, one entry per string in the instrument's order
    pub tones: FretMap,
}
