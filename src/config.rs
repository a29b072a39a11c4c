//! Analyzer configuration.

use sui_analyzer_types::framework::SUI_COIN_TYPE;
use sui_analyzer_types::{env_bool, env_string_or, env_var_or, normalize_type_string};

/// Default number of object IDs per chain-data request.
pub const DEFAULT_OBJECT_BATCH_SIZE: usize = 50;

/// Tunables shared by every analyzer in a run.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Object IDs per `get_objects` request.
    pub object_batch_size: usize,

    /// Canonical type of the coin that pays for gas.
    pub native_coin_type: String,

    /// Log every issue reported by a root analyzer at `warn`.
    pub log_issues: bool,
}

impl AnalyzerConfig {
    /// Build a config from `SUI_ANALYZER_*` environment variables, falling
    /// back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let native = env_string_or("SUI_ANALYZER_NATIVE_COIN_TYPE", SUI_COIN_TYPE);
        Self {
            object_batch_size: env_var_or(
                "SUI_ANALYZER_OBJECT_BATCH_SIZE",
                DEFAULT_OBJECT_BATCH_SIZE,
            )
            .max(1),
            native_coin_type: canonical_coin_type(&native),
            log_issues: env_bool("SUI_ANALYZER_LOG_ISSUES"),
        }
    }

    /// Builder: set the batch size (at least 1).
    pub fn with_object_batch_size(mut self, size: usize) -> Self {
        self.object_batch_size = size.max(1);
        self
    }

    /// Builder: set the native coin type.
    pub fn with_native_coin_type(mut self, coin_type: &str) -> Self {
        self.native_coin_type = canonical_coin_type(coin_type);
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            object_batch_size: DEFAULT_OBJECT_BATCH_SIZE,
            native_coin_type: canonical_coin_type(SUI_COIN_TYPE),
            log_issues: false,
        }
    }
}

fn canonical_coin_type(coin_type: &str) -> String {
    normalize_type_string(coin_type).unwrap_or_else(|| coin_type.trim().to_string())
}
