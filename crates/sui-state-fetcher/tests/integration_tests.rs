//! Integration tests for the batched object fetch.

use anyhow::{bail, Result};
use move_core_types::account_address::AccountAddress;
use parking_lot::Mutex;

use sui_analyzer_types::{FetchedObject, MoveFunction};
use sui_state_fetcher::{fetch_objects_batched, ChainDataProvider, InMemoryChainData};

/// Records the size of every `get_objects` call and delegates to an inner store.
struct RecordingProvider {
    inner: InMemoryChainData,
    chunk_sizes: Mutex<Vec<usize>>,
    fail_on: Option<String>,
}

#[async_trait::async_trait]
impl ChainDataProvider for RecordingProvider {
    async fn get_objects(&self, ids: &[String]) -> Result<Vec<Result<FetchedObject>>> {
        self.chunk_sizes.lock().push(ids.len());
        if let Some(bad) = &self.fail_on {
            if ids.contains(bad) {
                bail!("connection reset");
            }
        }
        self.inner.get_objects(ids).await
    }

    async fn get_move_function(
        &self,
        package: &str,
        module: &str,
        function: &str,
    ) -> Result<MoveFunction> {
        self.inner.get_move_function(package, module, function).await
    }
}

fn provider_with_coins(count: u64, fail_on: Option<String>) -> (RecordingProvider, Vec<String>) {
    let inner = InMemoryChainData::new();
    let ids: Vec<String> = (0..count).map(|i| format!("0x{:x}", 0xc000 + i)).collect();
    for (i, id) in ids.iter().enumerate() {
        inner
            .add_coin(id, "0x2::sui::SUI", i as u64, AccountAddress::ONE)
            .unwrap();
    }
    (
        RecordingProvider {
            inner,
            chunk_sizes: Mutex::new(Vec::new()),
            fail_on,
        },
        ids,
    )
}

#[tokio::test]
async fn test_batches_preserve_order() {
    let (provider, ids) = provider_with_coins(7, None);

    let results = fetch_objects_batched(&provider, &ids, 3).await.unwrap();

    assert_eq!(results.len(), 7);
    for (id, result) in ids.iter().zip(&results) {
        assert_eq!(&result.as_ref().unwrap().object_id, id);
    }
    let mut sizes = provider.chunk_sizes.lock().clone();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 3, 3]);
}

#[tokio::test]
async fn test_empty_id_list_makes_no_request() {
    let (provider, _) = provider_with_coins(0, None);
    let results = fetch_objects_batched(&provider, &[], 50).await.unwrap();
    assert!(results.is_empty());
    assert!(provider.chunk_sizes.lock().is_empty());
}

#[tokio::test]
async fn test_zero_batch_size_is_clamped() {
    let (provider, ids) = provider_with_coins(2, None);
    let results = fetch_objects_batched(&provider, &ids, 0).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(provider.chunk_sizes.lock().len(), 2);
}

#[tokio::test]
async fn test_failing_batch_fails_the_call() {
    let (provider, ids) = provider_with_coins(4, Some("0xc003".to_string()));
    let err = fetch_objects_batched(&provider, &ids, 2).await.unwrap_err();
    assert!(format!("{:#}", err).contains("connection reset"));
}
