//! Request and result types for the generation protocol.
//!
//! These mirror the JSON bodies exchanged with the generation server:
//! [`GenerationRequest`] is the `POST /generate` body, [`JobHandle`] wraps
//! the returned job identifier, and [`AddressResult`] is the key material
//! attached to a `complete` status payload.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where the pattern must match in the encoded address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Pattern must appear at the start of the address.
    Prefix,
    /// Pattern must appear at the end of the address.
    Suffix,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Prefix => write!(f, "prefix"),
            Position::Suffix => write!(f, "suffix"),
        }
    }
}

impl FromStr for Position {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prefix" => Ok(Position::Prefix),
            "suffix" => Ok(Position::Suffix),
            other => Err(CoreError::Validation(format!(
                "Position must be 'prefix' or 'suffix', got '{other}'"
            ))),
        }
    }
}

/// A search request: the JSON body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub pattern: String,
    pub position: Position,
}

impl GenerationRequest {
    /// Build a request, checking shape only (pattern non-empty).
    ///
    /// Alphabet legality and length limits are validated server-side; the
    /// client does not second-guess them.
    pub fn new(pattern: impl Into<String>, position: Position) -> Result<Self, CoreError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(CoreError::Validation("Pattern cannot be empty".into()));
        }
        Ok(Self { pattern, position })
    }
}

/// Opaque server-assigned job identifier.
///
/// The sole correlation key between a submission and its status queries.
/// Never reused after the job reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

/// Key material produced by a completed job.
///
/// Produced exactly once per completed job; immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResult {
    /// Base58 encoding of the public key (the address itself).
    pub public_key: String,
    /// Base58 encoding of the full keypair bytes.
    pub private_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = GenerationRequest::new("abc", Position::Prefix).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"pattern": "abc", "position": "prefix"}));
    }

    #[test]
    fn suffix_position_serializes_lowercase() {
        let request = GenerationRequest::new("xyz", Position::Suffix).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["position"], "suffix");
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let err = GenerationRequest::new("", Position::Prefix).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn position_parses_case_insensitively() {
        assert_eq!("prefix".parse::<Position>().unwrap(), Position::Prefix);
        assert_eq!("SUFFIX".parse::<Position>().unwrap(), Position::Suffix);
    }

    #[test]
    fn unknown_position_is_rejected() {
        assert!("middle".parse::<Position>().is_err());
    }

    #[test]
    fn address_result_deserializes() {
        let json = r#"{"public_key":"abc9fXk","private_key":"5Kd..."}"#;
        let result: AddressResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.public_key, "abc9fXk");
        assert_eq!(result.private_key, "5Kd...");
    }
}
