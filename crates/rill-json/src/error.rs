//! Error types for parsing, emitting, and typed serialization.

use thiserror::Error;

/// Errors that can occur while parsing JSON or round-tripping typed values.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The input violated JSON syntax: an unexpected byte, mismatched
    /// brackets, or a value in an invalid position.
    #[error("malformed JSON: {message}")]
    MalformedSyntax { message: String },

    /// Input ended while a string, number, or literal was still open.
    #[error("unterminated token: {message}")]
    UnterminatedToken { message: String },

    /// A typed round trip was requested for a type with no registered
    /// serializer.
    #[error("no serializer registered for type: {type_name}")]
    NoSerializer { type_name: &'static str },

    /// An accessor was called against the wrong document variant
    /// (e.g. reading a string out of a number).
    #[error("expected {expected} value, found {found}")]
    VariantMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The parse was cancelled before completion.
    #[error("parse cancelled")]
    Cancelled,

    /// The byte source failed while pulling a chunk.
    #[error("byte source error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        JsonError::MalformedSyntax {
            message: message.into(),
        }
    }

    pub(crate) fn unterminated(message: impl Into<String>) -> Self {
        JsonError::UnterminatedToken {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout rill-json.
pub type Result<T> = std::result::Result<T, JsonError>;
