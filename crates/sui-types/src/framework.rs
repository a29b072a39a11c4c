//! Sui framework constants and well-known addresses.
//!
//! # Example
//!
//! ```
//! use sui_analyzer_types::framework::{is_framework_address, MOVE_STDLIB};
//!
//! assert!(is_framework_address(&MOVE_STDLIB));
//! ```

use move_core_types::account_address::AccountAddress;

// ============================================================================
// Framework Package Addresses
// ============================================================================

/// Move standard library address (0x1)
pub const MOVE_STDLIB: AccountAddress = AccountAddress::ONE;

/// Sui framework address (0x2)
pub const SUI_FRAMEWORK: AccountAddress = {
    let mut bytes = [0u8; 32];
    bytes[31] = 2;
    AccountAddress::new(bytes)
};

/// Sui system address (0x3)
pub const SUI_SYSTEM: AccountAddress = {
    let mut bytes = [0u8; 32];
    bytes[31] = 3;
    AccountAddress::new(bytes)
};

/// All framework package addresses (0x1, 0x2, 0x3)
pub const FRAMEWORK_ADDRESSES: [AccountAddress; 3] = [MOVE_STDLIB, SUI_FRAMEWORK, SUI_SYSTEM];

/// Check if an address is a framework package (0x1, 0x2, or 0x3)
#[inline]
pub fn is_framework_address(addr: &AccountAddress) -> bool {
    FRAMEWORK_ADDRESSES.contains(addr)
}

// ============================================================================
// Coin Types
// ============================================================================

/// Module holding the generic coin struct
pub const COIN_MODULE: &str = "coin";

/// Generic coin struct name, `Coin<T>`
pub const COIN_STRUCT: &str = "Coin";

/// Native gas coin type in short form
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";
