//! Price provider abstraction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Result};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use sui_analyzer_types::normalize_type_string;

use crate::types::FetchStats;

/// Price quote for one coin type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinPrice {
    pub coin_type: String,
    pub decimals: u8,
    /// Unit price; None when the provider has no quote.
    pub price: Option<f64>,
}

/// Source of coin metadata and prices.
#[async_trait::async_trait]
pub trait PriceProvider: Send + Sync {
    /// One entry per requested coin type, in request order.
    async fn get_prices(&self, coin_types: &[String]) -> Result<Vec<CoinPrice>>;
}

/// Fixed price table keyed by canonical coin type.
///
/// Types without an entry are reported with zero decimals and no price.
#[derive(Debug, Default)]
pub struct StaticPrices {
    prices: RwLock<HashMap<String, (u8, Option<f64>)>>,
    failing: AtomicBool,
    stats: Mutex<FetchStats>,
}

impl StaticPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a quote.
    pub fn with_price(self, coin_type: &str, decimals: u8, price: Option<f64>) -> Self {
        self.set_price(coin_type, decimals, price);
        self
    }

    pub fn set_price(&self, coin_type: &str, decimals: u8, price: Option<f64>) {
        self.prices
            .write()
            .insert(canonical(coin_type), (decimals, price));
    }

    /// Make every subsequent `get_prices` call fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn stats(&self) -> FetchStats {
        self.stats.lock().clone()
    }
}

fn canonical(coin_type: &str) -> String {
    normalize_type_string(coin_type).unwrap_or_else(|| coin_type.to_string())
}

#[async_trait::async_trait]
impl PriceProvider for StaticPrices {
    async fn get_prices(&self, coin_types: &[String]) -> Result<Vec<CoinPrice>> {
        self.stats.lock().price_requests += 1;
        if self.failing.load(Ordering::SeqCst) {
            bail!("Price provider unavailable");
        }

        let prices = self.prices.read();
        Ok(coin_types
            .iter()
            .map(|coin_type| {
                let (decimals, price) = prices
                    .get(&canonical(coin_type))
                    .copied()
                    .unwrap_or((0, None));
                CoinPrice {
                    coin_type: coin_type.clone(),
                    decimals,
                    price,
                }
            })
            .collect())
    }
}
