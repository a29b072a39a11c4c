//! Address normalization and pure-value decoding.
//!
//! Object IDs arrive in every form a client may produce (`0x2`, `0X02`, full
//! 64-hex). Analyzers compare IDs as strings, so everything is funneled
//! through [`normalize_address`] first.

use anyhow::{anyhow, Context, Result};
use move_core_types::account_address::AccountAddress;

// =============================================================================
// Hex Address Parsing
// =============================================================================

/// Parse a hex string to an AccountAddress with context-aware error message.
///
/// # Examples
///
/// ```ignore
/// use sui_analyzer_types::encoding::parse_address;
///
/// let addr = parse_address("0x2", "package")?;
/// ```
pub fn parse_address(hex_str: &str, context: &str) -> Result<AccountAddress> {
    AccountAddress::from_hex_literal(&normalize_address(hex_str))
        .map_err(|e| anyhow!("Invalid {} '{}': {}", context, hex_str, e))
}

// =============================================================================
// Address Formatting & Normalization
// =============================================================================

/// Normalize an address string to lowercase with 0x prefix and full 64 hex characters.
///
/// # Examples
///
/// ```
/// use sui_analyzer_types::encoding::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2"),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// ```
pub fn normalize_address(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    if hex.len() < 64 {
        format!("0x{:0>64}", hex)
    } else {
        format!("0x{}", &hex[..64])
    }
}

// =============================================================================
// Pure Values
// =============================================================================

/// Decode a BCS `u64` from pure input bytes.
pub fn decode_pure_u64(bytes: &[u8]) -> Result<u64> {
    bcs::from_bytes(bytes)
        .with_context(|| format!("Pure input 0x{} is not a BCS-encoded u64", hex::encode(bytes)))
}

/// Decode a BCS address from pure input bytes.
pub fn decode_pure_address(bytes: &[u8]) -> Result<AccountAddress> {
    bcs::from_bytes(bytes).with_context(|| {
        format!("Pure input 0x{} is not a BCS-encoded address", hex::encode(bytes))
    })
}
