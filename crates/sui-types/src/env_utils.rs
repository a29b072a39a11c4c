//! Environment variable parsing utilities.
//!
//! Replaces the usual `std::env::var(..).ok().and_then(|v| v.parse().ok())`
//! boilerplate used by configuration constructors.
//!
//! # Example
//!
//! ```
//! use sui_analyzer_types::env_utils::{env_bool, env_var_or};
//!
//! let batch: usize = env_var_or("OBJECT_BATCH_SIZE", 50);
//! let verbose = env_bool("VERBOSE");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
///
/// Returns the default if the variable is not set or cannot be parsed.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Check if an environment variable is set to a truthy value.
///
/// Returns `true` if the variable is set to "1", "true", "yes", or "on" (case-insensitive).
pub fn env_bool(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Get an environment variable as a string with a default value.
///
/// An empty value counts as unset.
pub fn env_string_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
