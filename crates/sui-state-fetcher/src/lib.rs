//! Chain-data and price collaborators for transaction analysis.
//!
//! The analyzers never talk to the network directly. They go through
//! [`ChainDataProvider`] for objects and Move function signatures and through
//! [`PriceProvider`] for coin prices. This crate defines both traits, a batched
//! object-fetch helper, and in-memory implementations.
//!
//! # Example
//!
//! ```ignore
//! use sui_state_fetcher::{fetch_objects_batched, InMemoryChainData};
//!
//! let chain = InMemoryChainData::new();
//! let objects = fetch_objects_batched(&chain, &ids, 50).await?;
//! ```

pub mod memory;
pub mod price;
pub mod provider;
pub mod types;

pub use memory::InMemoryChainData;
pub use price::{CoinPrice, PriceProvider, StaticPrices};
pub use provider::{fetch_objects_batched, ChainDataProvider};
pub use types::FetchStats;
