//! Shared types for the sui-tx-analyzer workspace.
//!
//! This crate holds the data that crosses crate boundaries and performs no I/O:
//!
//! - [`transaction`]: the decoded transaction handed to the analyzers
//!   ([`TransactionData`], [`PtbCommand`], [`PtbArgument`], [`TransactionInput`])
//! - [`fetched`]: objects and Move function signatures returned by a chain-data provider
//! - [`encoding`], [`type_parsing`]: address and type-string normalization
//! - [`framework`]: framework addresses and coin type constants
//! - [`env_utils`]: environment variable helpers for configuration

pub mod encoding;
pub mod env_utils;
pub mod fetched;
pub mod framework;
pub mod transaction;
pub mod type_parsing;

pub use encoding::{normalize_address, parse_address};
pub use env_utils::{env_bool, env_string_or, env_var, env_var_or};
pub use fetched::{
    CoinContents, FetchedObject, MoveFunction, ObjectID, ObjectOwner, OpenSignature, Reference,
    Visibility,
};
pub use transaction::{
    GasData, ObjectRef, PtbArgument, PtbCommand, TransactionData, TransactionInput,
};
pub use type_parsing::{coin_type_argument, normalize_type_string, parse_type_tag};
