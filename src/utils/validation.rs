//! Centralized request validation.

/// Maximum length of a query path segment (DOS protection)
pub const MAX_QUERY_LENGTH: usize = 256;

/// Maximum length of an instrument name
pub const MAX_INSTRUMENT_NAME_LENGTH: usize = 64;

/// Security validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Instrument name is empty")]
    EmptyInstrument,
    #[error("Instrument name too long: exceeds {MAX_INSTRUMENT_NAME_LENGTH} characters")]
    InstrumentTooLong,
    #[error("Invalid instrument name: only letters, digits and underscores are allowed")]
    InvalidInstrument,
    #[error("Query too long: exceeds {MAX_QUERY_LENGTH} characters")]
    QueryTooLong,
}

/// Is `name` a single word of ASCII letters, digits or underscores?
///
/// # Examples
///
/// ```
/// use chord_search::utils::validation::is_valid_instrument_name;
///
/// assert!(is_valid_instrument_name("guitar"));
/// assert!(is_valid_instrument_name("bass_4"));
/// assert!(!is_valid_instrument_name("../etc"));
/// assert!(!is_valid_instrument_name(""));
/// ```
#[must_use]
pub fn is_valid_instrument_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_INSTRUMENT_NAME_LENGTH
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate an instrument path segment
///
/// # Errors
///
/// Returns `ValidationError::EmptyInstrument` if the name is empty,
/// `ValidationError::InstrumentTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidInstrument` if it contains other characters.
pub fn validate_instrument(name: &str) -> Result<&str, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyInstrument);
    }
    if name.len() > MAX_INSTRUMENT_NAME_LENGTH {
        return Err(ValidationError::InstrumentTooLong);
    }
    if !is_valid_instrument_name(name) {
        return Err(ValidationError::InvalidInstrument);
    }
    Ok(name)
}

/// Validate a query path segment before decoding
///
/// Malformed text is not an error (it simply matches nothing); only
/// oversized input is rejected.
///
/// # Errors
///
/// Returns `ValidationError::QueryTooLong` if the query exceeds the limit.
pub fn validate_query(query: &str) -> Result<&str, ValidationError> {
    if query.len() > MAX_QUERY_LENGTH {
        return Err(ValidationError::QueryTooLong);
    }
    Ok(query)
}
