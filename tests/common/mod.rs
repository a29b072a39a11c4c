#![allow(unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: Well-known IDs, coin types and a small transaction builder
//! - `mocks`: Mock chain data and prices mirroring a funded sender
//! - `assertions`: Assertion helpers with descriptive failure messages
//! - `setup`: One-call analysis runs against the mocks

pub mod assertions;
pub mod fixtures;
pub mod mocks;
pub mod setup;

pub use assertions::{
    assert_close, assert_err, assert_error_contains, assert_issue_contains, assert_ok,
    expect_result,
};
pub use fixtures::{addr, canonical, nested, TxBuilder};
pub use mocks::{create_mock_coin, mock_chain, mock_prices};
pub use setup::{analyze, analyze_with, options, outflows, shared_mocks};
