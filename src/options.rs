//! Caller-supplied options and the context handed to every analyzer step.

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use sui_analyzer_types::TransactionData;
use sui_state_fetcher::{ChainDataProvider, PriceProvider};

use crate::config::AnalyzerConfig;

/// The transaction to analyze, decoded or not.
#[derive(Debug, Clone)]
pub enum TransactionPayload {
    /// JSON encoding of [`TransactionData`]
    Json(String),
    Decoded(Arc<TransactionData>),
}

impl TransactionPayload {
    pub fn decode(&self) -> Result<Arc<TransactionData>> {
        match self {
            TransactionPayload::Json(json) => Ok(Arc::new(TransactionData::from_json(json)?)),
            TransactionPayload::Decoded(data) => Ok(data.clone()),
        }
    }
}

impl From<TransactionData> for TransactionPayload {
    fn from(data: TransactionData) -> Self {
        TransactionPayload::Decoded(Arc::new(data))
    }
}

impl From<Arc<TransactionData>> for TransactionPayload {
    fn from(data: Arc<TransactionData>) -> Self {
        TransactionPayload::Decoded(data)
    }
}

impl From<String> for TransactionPayload {
    fn from(json: String) -> Self {
        TransactionPayload::Json(json)
    }
}

impl From<&str> for TransactionPayload {
    fn from(json: &str) -> Self {
        TransactionPayload::Json(json.to_string())
    }
}

/// Everything a run needs besides the analyzers themselves.
///
/// Collaborators are optional; an analyzer that needs a missing one reports
/// an issue instead of running.
#[derive(Clone)]
pub struct AnalyzerOptions {
    pub transaction: TransactionPayload,
    pub chain: Option<Arc<dyn ChainDataProvider>>,
    pub prices: Option<Arc<dyn PriceProvider>>,
    pub config: AnalyzerConfig,
}

impl AnalyzerOptions {
    pub fn new(transaction: impl Into<TransactionPayload>) -> Self {
        Self {
            transaction: transaction.into(),
            chain: None,
            prices: None,
            config: AnalyzerConfig::default(),
        }
    }

    pub fn with_chain_data(mut self, chain: Arc<dyn ChainDataProvider>) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn with_prices(mut self, prices: Arc<dyn PriceProvider>) -> Self {
        self.prices = Some(prices);
        self
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }
}

impl fmt::Debug for AnalyzerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerOptions")
            .field("transaction", &self.transaction)
            .field("chain", &self.chain.is_some())
            .field("prices", &self.prices.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Read-only view shared by every step of one run.
#[derive(Debug)]
pub struct AnalysisContext {
    options: AnalyzerOptions,
    transaction: Arc<TransactionData>,
}

impl AnalysisContext {
    pub(crate) fn new(options: AnalyzerOptions, transaction: Arc<TransactionData>) -> Self {
        Self {
            options,
            transaction,
        }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// The decoded transaction under analysis.
    pub fn transaction(&self) -> &Arc<TransactionData> {
        &self.transaction
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.options.config
    }

    pub fn chain(&self) -> Result<&dyn ChainDataProvider> {
        self.options
            .chain
            .as_deref()
            .ok_or_else(|| anyhow!("No chain-data provider configured"))
    }

    pub fn prices(&self) -> Result<&dyn PriceProvider> {
        self.options
            .prices
            .as_deref()
            .ok_or_else(|| anyhow!("No price provider configured"))
    }
}
