//! Input validation module
//!
//! Parses hex-encoded 256-bit values and owner addresses at the HTTP
//! boundary; everything past this point works on fixed-width byte arrays.

use obscura_core::{OwnerId, Word};

use crate::error::ApiError;

/// Parse a hex-encoded 256-bit value from a request field.
pub fn parse_word(field: &str, value: &str) -> Result<Word, ApiError> {
    Word::from_hex(value.trim())
        .map_err(|e| ApiError::bad_request(format!("Invalid {}: {}", field, e)))
}

/// Parse a hex-encoded owner address from a request field.
pub fn parse_owner(field: &str, value: &str) -> Result<OwnerId, ApiError> {
    OwnerId::from_hex(value.trim())
        .map_err(|e| ApiError::bad_request(format!("Invalid {}: {}", field, e)))
}
