//! Analysis rules built on the runtime.
//!
//! Every rule is exposed through a function returning a process-wide handle,
//! so two roots that depend on the same rule share one execution per run.
//!
//! | rule | output |
//! |------|--------|
//! | [`data()`] | the decoded transaction |
//! | [`object_ids()`] | object input and gas payment IDs |
//! | [`objects()`] | fetched objects with owner addresses |
//! | [`owned_objects()`], [`objects_by_id()`] | views over `objects` |
//! | [`inputs()`] | resolved inputs |
//! | [`move_functions()`] | signatures of called Move functions |
//! | [`commands()`] | resolved commands with access levels |
//! | [`coins()`], [`gas_coins()`] | coin objects and their balances |
//! | [`coin_flows()`] | net outflow per coin type |
//! | [`coin_values()`] | outflows priced by a [`PriceProvider`](sui_state_fetcher::PriceProvider) |
//! | [`classification()`] | command and package classification |

/// Define `fn $name() -> AnalyzerHandle<$ty>` backed by a lazily created static.
macro_rules! singleton {
    ($(#[$meta:meta])* $vis:vis fn $name:ident() -> $ty:ident) => {
        $(#[$meta])*
        $vis fn $name() -> $crate::analyzer::AnalyzerHandle<$ty> {
            static HANDLE: std::sync::LazyLock<$crate::analyzer::AnalyzerHandle<$ty>> =
                std::sync::LazyLock::new(|| $crate::analyzer::AnalyzerHandle::new($ty));
            HANDLE.clone()
        }
    };
}

mod classify;
mod coin_flows;
mod coin_value;
mod coins;
mod commands;
mod core;
mod functions;
mod inputs;
mod objects;

pub use classify::{classification, Classification, ClassificationTag, PtbClassification};
pub use coin_flows::{coin_flows, CoinFlow, CoinFlowSummary, CoinFlows};
pub use coin_value::{coin_values, CoinValue, CoinValueSummary, CoinValues};
pub use coins::{coins, gas_coins, Coins, GasCoins};
pub use commands::{commands, Commands};
pub use self::core::{data, Data};
pub use functions::{move_functions, FunctionKey, MoveFunctions};
pub use inputs::{inputs, Inputs};
pub use objects::{
    object_ids, objects, objects_by_id, owned_objects, ObjectIds, Objects, ObjectsById,
    OwnedObjects, OBJECTS_CACHE_KEY,
};
