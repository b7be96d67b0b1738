//! Secondary lookups attached to an already-discovered entity.
//!
//! Enrichment runs only after discovery succeeded and is keyed by fields of
//! the discovered entity. Its results are never filtered. Whether a failed
//! enrichment fails the request is decided by the [`EnrichmentPolicy`].

pub mod events;
pub mod trailers;

use std::future::Future;

use randomedia_core::Result;
use tracing::warn;

pub use events::EventSearch;
pub use trailers::TrailerSearch;

/// What to do when an enrichment lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentPolicy {
    /// Propagate the failure instead of answering with an empty list.
    pub strict: bool,
}

impl EnrichmentPolicy {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Await `lookup`, applying the policy to a failure.
    pub async fn apply<T, F>(&self, kind: &'static str, lookup: F) -> Result<Vec<T>>
    where
        F: Future<Output = Result<Vec<T>>>,
    {
        match lookup.await {
            Ok(items) => Ok(items),
            Err(error) if !self.strict => {
                warn!(enrichment = kind, error = %error, "Enrichment failed, returning no results");
                Ok(Vec::new())
            }
            Err(error) => Err(error),
        }
    }
}
