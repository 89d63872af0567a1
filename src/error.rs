//! Error types for rs-distiller.
//!
//! Every failure aborts the current request. Callers that need to map failures
//! to a protocol status should match on [`Error::kind`] rather than on payloads.

use std::fmt;

/// Error type for distillation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page source could not be parsed as HTML (binary data, bad URL syntax).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Boilerplate removal failed internally.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// A required statistical model is missing or corrupt.
    #[error("Model '{model}' unavailable: {reason}")]
    ModelUnavailable {
        /// Model file name, e.g. `en-ner-person.json`.
        model: String,
        /// Why loading failed.
        reason: String,
    },

    /// Dereferencing a URL failed.
    #[error("Source unreachable: {0}")]
    SourceUnreachable(String),

    /// The caller cancelled the request between pipeline steps.
    #[error("Request cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn model(model: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::ModelUnavailable {
            model: model.into(),
            reason: reason.to_string(),
        }
    }

    /// Coarse classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::Extraction(_) => ErrorKind::Extraction,
            Self::ModelUnavailable { .. } => ErrorKind::ModelUnavailable,
            Self::SourceUnreachable(_) => ErrorKind::SourceUnreachable,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Error kind carried by every [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    Extraction,
    ModelUnavailable,
    SourceUnreachable,
    Cancelled,
}

impl ErrorKind {
    /// Stable identifier suitable for logs and wire formats.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedInput => "malformed_input",
            Self::Extraction => "extraction",
            Self::ModelUnavailable => "model_unavailable",
            Self::SourceUnreachable => "source_unreachable",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type alias for distillation operations.
pub type Result<T> = std::result::Result<T, Error>;
