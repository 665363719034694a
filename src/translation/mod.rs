//! Translation sources: the remote dictionary the search feature queries.
//!
//! The search engine only depends on the [`TranslationSource`] trait. The
//! HTTP client and the LRU cache in this module are the concrete sources the
//! binary wires together.

pub mod cache;
pub mod http;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use cache::CachedSource;
pub use http::DictionaryClient;

/// One completed lookup: the word the dictionary matched and its meanings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Text the dictionary matched (may differ in case from the query).
    pub original_text: String,
    /// Ordered meanings, most relevant first.
    pub meanings: Vec<Meaning>,
}

/// A single meaning of a [`Translation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meaning {
    pub translated_text: String,
    /// Illustration for the meaning (absolute URL).
    pub image_url: String,
}

impl Translation {
    pub fn new(original_text: impl Into<String>, meanings: Vec<Meaning>) -> Self {
        Self {
            original_text: original_text.into(),
            meanings,
        }
    }
}

impl Meaning {
    pub fn new(translated_text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            translated_text: translated_text.into(),
            image_url: image_url.into(),
        }
    }
}

/// Errors a translation source can fail with.
///
/// The search engine treats every variant the same way; the distinction only
/// matters for rendering and logs. Payloads are plain strings so the error
/// can live inside a comparable state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Connection, timeout or other transport-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Dictionary answered with a non-success status
    #[error("Dictionary error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Opaque failure from a custom source
    #[error("{0}")]
    Other(String),
}

/// Asynchronous lookup of a validated query.
///
/// Implementations must tolerate being dropped mid-flight: the search engine
/// abandons a lookup by dropping its future when the user keeps typing.
#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Returns the name of this source for logging.
    fn name(&self) -> &'static str;

    /// Look up `query` and return the matched translations.
    async fn lookup(&self, query: &str) -> Result<Vec<Translation>, SourceError>;
}
