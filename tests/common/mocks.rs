//! Mock chain data and prices.
//!
//! The default chain holds a funded sender (`0x123`) with SUI, USDC and WETH
//! coins, a few objects owned by someone else, a shared pool, and the Move
//! functions of the `0x999::test` module.

use move_core_types::account_address::AccountAddress;

use sui_analyzer_types::{FetchedObject, MoveFunction, ObjectOwner, OpenSignature};
use sui_state_fetcher::{InMemoryChainData, StaticPrices};

use super::fixtures::*;

/// Size of a mock coin in bytes (32-byte UID + 8-byte balance).
const MOCK_COIN_SIZE: usize = 40;

/// Create mock coin contents with the given ID and balance.
///
/// The layout matches the Sui Coin struct:
/// - First 32 bytes: UID (object ID)
/// - Next 8 bytes: balance (u64, little-endian)
pub fn create_mock_coin(id: AccountAddress, balance: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MOCK_COIN_SIZE);
    bytes.extend_from_slice(id.as_ref());
    bytes.extend_from_slice(&balance.to_le_bytes());
    bytes
}

/// A `Coin<coin_type>` object with an arbitrary owner.
pub fn mock_coin_object(id: &str, coin_type: &str, balance: u64, owner: ObjectOwner) -> FetchedObject {
    FetchedObject::new(id, 1, create_mock_coin(addr(id), balance))
        .with_type(format!("0x2::coin::Coin<{}>", coin_type))
        .with_owner(owner)
}

/// Add `count` coins of `coin_type` splitting `total` deterministically: the
/// first gets half, the next a quarter, and so on; the last takes the rest.
///
/// IDs are `base` followed by a two-digit hex index.
pub fn add_mock_coins(chain: &InMemoryChainData, base: &str, coin_type: &str, total: u64, count: u32) {
    let mut remaining = total;
    for i in 0..count {
        let balance = if i + 1 == count {
            remaining
        } else {
            total / 2u64.pow(i + 1)
        };
        remaining -= balance;
        chain
            .add_coin(&format!("{}{:02x}", base, i), coin_type, balance, addr(SENDER))
            .expect("mock coin");
    }
}

pub fn mock_chain() -> InMemoryChainData {
    let chain = InMemoryChainData::new();

    // 10 SUI: 0xa5c000 = 5 SUI, 0xa5c001 = 2.5 SUI, ...
    add_mock_coins(&chain, "0xa5c0", SUI_TYPE, 10_000_000_000, 10);
    // 1000 USDC: 0xb0c000 = 500 USDC
    add_mock_coins(&chain, "0xb0c0", USDC_TYPE, 1_000_000_000, 3);
    // 5 WETH: 0xc0c000 = 2.5 WETH
    add_mock_coins(&chain, "0xc0c0", WETH_TYPE, 5_000_000_000_000_000_000, 2);

    chain.add_object(mock_coin_object(
        PARENT_OWNED_COIN_ID,
        SUI_TYPE,
        100_000_000,
        ObjectOwner::ObjectOwner {
            address: addr("0xfeed"),
        },
    ));
    chain.add_object(mock_coin_object(
        CONSENSUS_COIN_ID,
        SUI_TYPE,
        50_000_000,
        ObjectOwner::ConsensusAddressOwner {
            owner: addr(SENDER),
            start_version: 100,
        },
    ));
    chain.add_object(mock_coin_object(
        OTHER_USER_COIN_ID,
        SUI_TYPE,
        5_000_000,
        ObjectOwner::address(addr(OTHER_USER)),
    ));
    chain.add_object(
        FetchedObject::new(NFT_ID, 1, addr(NFT_ID).to_vec())
            .with_type("0x999::nft::NFT")
            .with_owner(ObjectOwner::address(addr(OTHER_USER))),
    );
    chain.add_object(
        FetchedObject::new(SHARED_POOL_ID, 1, addr(SHARED_POOL_ID).to_vec())
            .with_type("0x999::pool::Pool")
            .shared(1),
    );

    for function in mock_move_functions() {
        chain.add_move_function(function);
    }
    chain
}

fn test_function(name: &str, parameters: Vec<OpenSignature>) -> MoveFunction {
    MoveFunction::new(TEST_PACKAGE, TEST_MODULE, name, parameters)
}

fn mock_move_functions() -> Vec<MoveFunction> {
    let coin = "0x2::coin::Coin<T0>";
    let coins = "vector<0x2::coin::Coin<T0>>";
    vec![
        test_function(
            "transfer",
            vec![
                OpenSignature::mutable("0x999::nft::NFT"),
                OpenSignature::by_value("u64"),
                OpenSignature::by_value("address"),
                OpenSignature::by_value("bool"),
            ],
        ),
        test_function("batch_transfer", vec![OpenSignature::mutable(coins)]),
        test_function(
            "transfer_nft",
            vec![
                OpenSignature::mutable("0x999::nft::NFT"),
                OpenSignature::by_value("address"),
            ],
        ),
        test_function(
            "consume_coin",
            vec![OpenSignature::mutable(coin), OpenSignature::by_value(coin)],
        ),
        test_function("batch_operation", vec![OpenSignature::mutable(coins)]),
        test_function("read_coin", vec![OpenSignature::immutable(coin)]),
        test_function("create_coin", vec![])
            .with_returns(vec![OpenSignature::by_value("0x2::coin::Coin<0x2::sui::SUI>")]),
        test_function("get_dynamic_amount", vec![])
            .with_returns(vec![OpenSignature::by_value("u64")]),
    ]
}

/// Prices: SUI $2.50, USDC $1, WETH $3000; the unknown token has none.
pub fn mock_prices() -> StaticPrices {
    StaticPrices::new()
        .with_price(SUI_TYPE, 9, Some(2.5))
        .with_price(USDC_TYPE, 6, Some(1.0))
        .with_price(WETH_TYPE, 18, Some(3000.0))
        .with_price(UNKNOWN_TOKEN_TYPE, 8, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sui_analyzer_types::CoinContents;

    #[test]
    fn test_create_mock_coin_matches_coin_layout() {
        let id = addr("0x1234");
        let coin = create_mock_coin(id, 1000);
        assert_eq!(coin.len(), MOCK_COIN_SIZE);
        let decoded = CoinContents::decode(&coin).unwrap();
        assert_eq!(decoded.id, id);
        assert_eq!(decoded.balance, 1000);
    }
}
