//! Error types for the translation engines

use thiserror::Error;

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Translation errors
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Schema family mismatch: expected {expected}, workspace declares {actual}")]
    FamilyMismatch { expected: String, actual: String },

    #[error("Invalid version identifier: {0}")]
    InvalidVersion(String),

    #[error("Illegal value for {kind} attribute '{attribute}': {value}")]
    IllegalValue {
        kind: String,
        attribute: String,
        value: String,
    },

    #[error("Unknown attribute '{attribute}' for {kind}")]
    UnknownAttribute { kind: String, attribute: String },

    #[error("Identity {identity} already mapped: the identity map is one-to-one and append-only")]
    DuplicateMapping { identity: String },

    #[error("No entity with identity {0}")]
    NoSuchEntity(String),
}
