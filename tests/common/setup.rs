//! High-level test setup helpers.

use std::sync::Arc;

use sui_analyzer_types::TransactionData;
use sui_state_fetcher::{InMemoryChainData, StaticPrices};
use sui_tx_analyzer::rules::{self, CoinFlowSummary, CoinFlows};
use sui_tx_analyzer::{AnalysisResults, AnalyzerOptions, AnalyzerResult, AnalyzerSet};

use super::mocks::{mock_chain, mock_prices};

/// Options wired to the default mock chain and prices.
pub fn options(tx: TransactionData) -> AnalyzerOptions {
    AnalyzerOptions::new(tx)
        .with_chain_data(Arc::new(mock_chain()))
        .with_prices(Arc::new(mock_prices()))
}

/// Run `roots` over `tx` against the default mocks.
pub async fn analyze(roots: AnalyzerSet, tx: TransactionData) -> AnalysisResults {
    analyze_with(roots, options(tx)).await
}

pub async fn analyze_with(roots: AnalyzerSet, options: AnalyzerOptions) -> AnalysisResults {
    sui_tx_analyzer::run(roots, options)
        .await
        .expect("transaction should decode")
}

/// Coin-flow result of `tx` against the default mocks.
pub async fn outflows(tx: TransactionData) -> AnalyzerResult<Arc<CoinFlowSummary>> {
    let results = analyze(AnalyzerSet::new().with("coin_flows", rules::coin_flows()), tx).await;
    results
        .get::<CoinFlows>("coin_flows")
        .expect("coin_flows root")
}

/// A mock chain and price table the test can keep a handle to.
#[allow(dead_code)]
pub fn shared_mocks() -> (Arc<InMemoryChainData>, Arc<StaticPrices>) {
    (Arc::new(mock_chain()), Arc::new(mock_prices()))
}
