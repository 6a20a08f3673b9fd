//! Error types for the analysis engine and its translation collaborator.
//!
//! Only `AnalysisError::UnsupportedRootLanguage` ever escapes `analyze`. Every
//! other degraded condition (short selection pool, failed translation, blank
//! text) is absorbed by the pipeline and shows up in the produced data.

use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by the engine, the registry, or settings loading.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The root language has no registry entry, so distance and selection
    /// cannot proceed.
    #[error("unsupported root language: '{0}'")]
    UnsupportedRootLanguage(String),

    /// The language table is malformed (duplicate or empty code, bad file).
    #[error("registry error: {0}")]
    Registry(String),

    /// The settings override file could not be read or parsed.
    #[error("settings error: {0}")]
    Settings(String),
}

/// Failures of a single translation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// Transport-level failure (connection, TLS, body decoding).
    #[error("translation request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("translation API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The backend answered successfully but returned no text.
    #[error("translation response contained no choices")]
    EmptyResponse,

    /// The call did not finish within the per-call deadline.
    #[error("translation to '{target}' timed out after {limit:?}")]
    Timeout { target: String, limit: Duration },

    /// The collaborator cannot translate into this language.
    #[error("translation to '{target}' is not supported")]
    Unsupported { target: String },
}

impl TranslationError {
    /// Whether retrying the same call could plausibly succeed.
    ///
    /// Rate limits (429) and server errors (5xx) are retried, as are transport
    /// failures. Other 4xx client errors fail immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::Api { status, .. } => *status == 429 || *status >= 500,
            TranslationError::Request(_) | TranslationError::Timeout { .. } => true,
            TranslationError::EmptyResponse | TranslationError::Unsupported { .. } => false,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
