//! Coin objects and the coins paying for gas.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use sui_analyzer_types::{coin_type_argument, CoinContents};

use super::core::{data, Data};
use super::objects::{objects, Objects};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Issue, Resolved};
use crate::model::{AnalyzedCoin, AnalyzedObject};
use crate::options::AnalysisContext;

/// Fetched objects of type `0x2::coin::Coin<T>`, keyed by normalized ID.
pub struct Coins;

#[async_trait::async_trait]
impl Analyzer for Coins {
    type Output = HashMap<String, AnalyzedCoin>;

    fn name(&self) -> &'static str {
        "coins"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new().with("objects", objects())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Self::Output>> {
        let objects = deps.get::<Objects>("objects")?;
        let mut coins = HashMap::new();
        let mut issues = Vec::new();
        for object in objects.iter() {
            match as_coin(object) {
                Ok(Some(coin)) => {
                    coins.insert(object.id.clone(), coin);
                }
                Ok(None) => {}
                Err(issue) => issues.push(issue),
            }
        }
        Ok(AnalyzerResult::from_parts(coins, issues))
    }
}

/// The object as a coin, None if it is not one.
fn as_coin(object: &Arc<AnalyzedObject>) -> Result<Option<AnalyzedCoin>, Issue> {
    let Some(coin_type) = object
        .object
        .type_string
        .as_deref()
        .and_then(coin_type_argument)
    else {
        return Ok(None);
    };
    let contents = CoinContents::decode(&object.object.bcs_bytes).map_err(|err| {
        Issue::with_cause(
            format!("Failed to decode coin balance of {}: {}", object.id, err),
            err,
        )
    })?;
    Ok(Some(AnalyzedCoin {
        object: object.clone(),
        coin_type,
        balance: contents.balance,
    }))
}

/// Coins in the gas payment, in payment order.
pub struct GasCoins;

#[async_trait::async_trait]
impl Analyzer for GasCoins {
    type Output = Vec<AnalyzedCoin>;

    fn name(&self) -> &'static str {
        "gas_coins"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new()
            .with("data", data())
            .with("coins", coins())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Vec<AnalyzedCoin>>> {
        let tx = deps.get::<Data>("data")?;
        let coins = deps.get::<Coins>("coins")?;

        let mut gas = Vec::with_capacity(tx.gas_data.payment.len());
        let mut issues = Vec::new();
        for payment in &tx.gas_data.payment {
            let id = payment.normalized_id();
            match coins.get(&id) {
                Some(coin) => gas.push(coin.clone()),
                None => issues.push(Issue::new(format!("Gas payment {} is not a coin", id))),
            }
        }
        Ok(AnalyzerResult::from_parts(gas, issues))
    }
}

singleton!(pub fn coins() -> Coins);
singleton!(pub fn gas_coins() -> GasCoins);
