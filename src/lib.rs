//! Sui Transaction Analyzer
//!
//! Derives facts about a proposed Sui transaction before it is signed:
//!
//! - **Analyzer runtime**: memoizing, dependency-aware evaluation of small
//!   analysis rules ([`analyzer`])
//! - **Resolved transaction model**: inputs, commands and coins joined with
//!   fetched chain data ([`model`], [`rules`])
//! - **Coin-flow simulation**: net outflow per coin type ([`simulation`])
//!
//! Chain data and prices come from the collaborators in [`sui_state_fetcher`].
//!
//! ```ignore
//! use std::sync::Arc;
//! use sui_tx_analyzer::{rules, run, AnalyzerOptions, AnalyzerSet};
//!
//! let results = run(
//!     AnalyzerSet::new()
//!         .with("coin_flows", rules::coin_flows())
//!         .with("classification", rules::classification()),
//!     AnalyzerOptions::new(tx).with_chain_data(Arc::new(chain)),
//! )
//! .await?;
//! ```

#![allow(clippy::type_complexity)]

pub mod analyzer;
pub mod config;
pub mod model;
pub mod options;
pub mod rules;
pub mod simulation;

pub use analyzer::{
    run, AnalysisResults, Analyzer, AnalyzerHandle, AnalyzerKey, AnalyzerResult, AnalyzerSet,
    Issue, Resolved,
};
pub use config::AnalyzerConfig;
pub use options::{AnalysisContext, AnalyzerOptions, TransactionPayload};
