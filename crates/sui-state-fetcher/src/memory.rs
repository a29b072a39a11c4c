//! In-memory chain data.
//!
//! Serves objects and Move functions from maps keyed by normalized ID. Used by
//! tests and by callers that already hold a snapshot of the relevant state.
//!
//! # Example
//!
//! ```ignore
//! use sui_state_fetcher::InMemoryChainData;
//!
//! let chain = InMemoryChainData::new();
//! chain.add_coin("0xa5c000", "0x2::sui::SUI", 5_000_000_000, sender)?;
//! let objects = chain.get_objects(&["0xa5c000".to_string()]).await?;
//! ```

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use move_core_types::account_address::AccountAddress;
use parking_lot::{Mutex, RwLock};

use sui_analyzer_types::encoding::normalize_address;
use sui_analyzer_types::{CoinContents, FetchedObject, MoveFunction, ObjectOwner};

use crate::provider::ChainDataProvider;
use crate::types::FetchStats;

/// (normalized package, module, function)
type FunctionKey = (String, String, String);

/// Thread-safe in-memory [`ChainDataProvider`].
#[derive(Debug, Default)]
pub struct InMemoryChainData {
    objects: RwLock<HashMap<String, FetchedObject>>,
    functions: RwLock<HashMap<FunctionKey, MoveFunction>>,
    stats: Mutex<FetchStats>,
}

impl InMemoryChainData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object, replacing any previous object with the same ID.
    pub fn add_object(&self, object: FetchedObject) {
        self.objects.write().insert(object.normalized_id(), object);
    }

    /// Store an address-owned `0x2::coin::Coin<coin_type>` holding `balance`.
    pub fn add_coin(
        &self,
        object_id: &str,
        coin_type: &str,
        balance: u64,
        owner: AccountAddress,
    ) -> Result<()> {
        let id = AccountAddress::from_hex_literal(&normalize_address(object_id))
            .map_err(|e| anyhow!("Invalid coin ID '{}': {}", object_id, e))?;
        let bytes = CoinContents { id, balance }.encode()?;
        self.add_object(
            FetchedObject::new(object_id, 1, bytes)
                .with_type(format!("0x2::coin::Coin<{}>", coin_type))
                .with_owner(ObjectOwner::address(owner)),
        );
        Ok(())
    }

    /// Store a Move function signature.
    pub fn add_move_function(&self, function: MoveFunction) {
        self.functions.write().insert(function.target(), function);
    }

    /// Snapshot of the lookups served so far.
    pub fn stats(&self) -> FetchStats {
        self.stats.lock().clone()
    }
}

#[async_trait::async_trait]
impl ChainDataProvider for InMemoryChainData {
    async fn get_objects(&self, ids: &[String]) -> Result<Vec<Result<FetchedObject>>> {
        let objects = self.objects.read();
        let results: Vec<Result<FetchedObject>> = ids
            .iter()
            .map(|id| {
                objects
                    .get(&normalize_address(id))
                    .cloned()
                    .ok_or_else(|| anyhow!("Object {} not found", id))
            })
            .collect();

        let mut stats = self.stats.lock();
        stats.object_requests += 1;
        stats.objects_requested += ids.len();
        stats.objects_fetched += results.iter().filter(|r| r.is_ok()).count();
        Ok(results)
    }

    async fn get_move_function(
        &self,
        package: &str,
        module: &str,
        function: &str,
    ) -> Result<MoveFunction> {
        self.stats.lock().function_requests += 1;
        let key = (
            normalize_address(package),
            module.to_string(),
            function.to_string(),
        );
        self.functions
            .read()
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow!("Function {}::{}::{} not found", package, module, function))
    }
}
