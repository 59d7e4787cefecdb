//! Literature source clients.

pub mod pubmed;

use async_trait::async_trait;
use crate::models::RawRecord;

/// Common interface for literature source clients.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Search for records matching a free-text query; returns source identifiers
    /// in the order the service ranked them.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<String>>;

    /// Fetch full records for the given identifiers.
    /// An empty identifier list returns an empty vec without a request.
    async fn fetch_records(
        &self,
        ids: &[String],
    ) -> anyhow::Result<Vec<RawRecord>>;
}
