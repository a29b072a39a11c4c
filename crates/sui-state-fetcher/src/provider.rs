//! Chain-data provider abstraction.
//!
//! Analyzers fetch objects and Move function signatures through this trait, so
//! the same rules run against a network client, a file-backed snapshot or the
//! in-memory fixtures in [`crate::memory`].

use anyhow::{Context, Result};
use futures::future::try_join_all;
use tracing::debug;

use sui_analyzer_types::{FetchedObject, MoveFunction};

/// Unified interface for object and function lookups.
#[async_trait::async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// Fetch objects by ID.
    ///
    /// The returned list is index-aligned with `ids`. A missing or unreadable
    /// object is an `Err` entry; the outer `Err` is reserved for failures of
    /// the whole request.
    async fn get_objects(&self, ids: &[String]) -> Result<Vec<Result<FetchedObject>>>;

    /// Fetch the normalized signature of `package::module::function`.
    async fn get_move_function(
        &self,
        package: &str,
        module: &str,
        function: &str,
    ) -> Result<MoveFunction>;
}

/// Fetch `ids` in chunks of `batch_size`, issuing the chunks concurrently.
///
/// Results keep the order of `ids`. A failing chunk fails the whole call;
/// per-object failures are passed through untouched.
pub async fn fetch_objects_batched(
    provider: &dyn ChainDataProvider,
    ids: &[String],
    batch_size: usize,
) -> Result<Vec<Result<FetchedObject>>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let batch_size = batch_size.max(1);
    debug!(
        objects = ids.len(),
        batches = ids.len().div_ceil(batch_size),
        "fetching objects"
    );

    let batches = ids.chunks(batch_size).map(|chunk| async move {
        let fetched = provider.get_objects(chunk).await?;
        anyhow::ensure!(
            fetched.len() == chunk.len(),
            "provider returned {} results for {} object IDs",
            fetched.len(),
            chunk.len()
        );
        Ok::<_, anyhow::Error>(fetched)
    });

    let results = try_join_all(batches)
        .await
        .context("Failed to fetch objects")?;
    Ok(results.into_iter().flatten().collect())
}
