//! Well-known IDs and a small transaction builder.

use move_core_types::account_address::AccountAddress;
use serde::Serialize;

use sui_analyzer_types::{
    normalize_type_string, ObjectRef, PtbArgument, PtbCommand, TransactionData, TransactionInput,
};

pub const SENDER: &str = "0x123";
pub const RECIPIENT: &str = "0x456";
pub const OTHER_USER: &str = "0xbabe";

/// SUI coins owned by the sender; the first pays for gas by default.
pub const GAS_COIN_ID: &str = "0xa5c000";
pub const COIN_2_ID: &str = "0xa5c001";
pub const USDC_COIN_ID: &str = "0xb0c000";
pub const WETH_COIN_ID: &str = "0xc0c000";
pub const PARENT_OWNED_COIN_ID: &str = "0xa5c04";
pub const CONSENSUS_COIN_ID: &str = "0xa5c05";
pub const OTHER_USER_COIN_ID: &str = "0xcafe";
pub const NFT_ID: &str = "0xdead";
pub const SHARED_POOL_ID: &str = "0xbeef";

pub const TEST_PACKAGE: &str = "0x999";
pub const TEST_MODULE: &str = "test";

pub const SUI_TYPE: &str = "0x2::sui::SUI";
pub const USDC_TYPE: &str = "0xa0b::usdc::USDC";
pub const WETH_TYPE: &str = "0xb0c::weth::WETH";
pub const UNKNOWN_TOKEN_TYPE: &str = "0x999::unknown::TOKEN";

pub const GAS_BUDGET: u64 = 10_000_000;
pub const GAS_PRICE: u64 = 1_000;

pub fn addr(hex: &str) -> AccountAddress {
    AccountAddress::from_hex_literal(hex).expect("valid test address")
}

/// Canonical spelling of a coin type, as analyzers report it.
pub fn canonical(coin_type: &str) -> String {
    normalize_type_string(coin_type).expect("valid test type")
}

pub fn nested(command: u16, slot: u16) -> PtbArgument {
    PtbArgument::NestedResult {
        index: command,
        result_index: slot,
    }
}

/// Builds transactions the way a wallet would hand them over: sender set,
/// gas paid by [`GAS_COIN_ID`] with a [`GAS_BUDGET`] budget.
pub struct TxBuilder {
    tx: TransactionData,
}

#[allow(dead_code)]
impl TxBuilder {
    pub fn new() -> Self {
        let tx = TransactionData::new(addr(SENDER))
            .with_gas_payment(vec![ObjectRef::new(GAS_COIN_ID, 1, "gas-digest")])
            .with_gas_budget(GAS_BUDGET)
            .with_gas_price(GAS_PRICE);
        Self { tx }
    }

    pub fn without_budget(mut self) -> Self {
        self.tx.gas_data.budget = None;
        self
    }

    pub fn with_gas_payment(mut self, ids: &[&str]) -> Self {
        self.tx.gas_data.payment = ids
            .iter()
            .map(|id| ObjectRef::new(*id, 1, "gas-digest"))
            .collect();
        self
    }

    pub fn input(&mut self, input: TransactionInput) -> PtbArgument {
        PtbArgument::Input {
            index: self.tx.push_input(input),
        }
    }

    pub fn object(&mut self, id: &str) -> PtbArgument {
        self.input(TransactionInput::object(id, 1, "digest"))
    }

    pub fn shared(&mut self, id: &str, mutable: bool) -> PtbArgument {
        self.input(TransactionInput::shared(id, 1, mutable))
    }

    pub fn pure<T: Serialize>(&mut self, value: &T) -> PtbArgument {
        self.input(TransactionInput::pure(value).expect("pure value encodes"))
    }

    pub fn pure_u64(&mut self, value: u64) -> PtbArgument {
        self.pure(&value)
    }

    pub fn pure_address(&mut self, hex: &str) -> PtbArgument {
        self.pure(&addr(hex))
    }

    pub fn command(&mut self, command: PtbCommand) -> u16 {
        self.tx.push_command(command)
    }

    pub fn split_coins(&mut self, coin: PtbArgument, amounts: Vec<PtbArgument>) -> u16 {
        self.command(PtbCommand::SplitCoins { coin, amounts })
    }

    pub fn merge_coins(&mut self, destination: PtbArgument, sources: Vec<PtbArgument>) -> u16 {
        self.command(PtbCommand::MergeCoins {
            destination,
            sources,
        })
    }

    pub fn transfer_objects(&mut self, objects: Vec<PtbArgument>, address: PtbArgument) -> u16 {
        self.command(PtbCommand::TransferObjects { objects, address })
    }

    pub fn make_move_vec(&mut self, type_arg: Option<&str>, elements: Vec<PtbArgument>) -> u16 {
        self.command(PtbCommand::MakeMoveVec {
            type_arg: type_arg.map(str::to_string),
            elements,
        })
    }

    /// Call `0x999::test::<function>`.
    pub fn test_call(&mut self, function: &str, arguments: Vec<PtbArgument>) -> u16 {
        self.move_call(TEST_PACKAGE, TEST_MODULE, function, arguments)
    }

    pub fn move_call(
        &mut self,
        package: &str,
        module: &str,
        function: &str,
        arguments: Vec<PtbArgument>,
    ) -> u16 {
        self.command(PtbCommand::MoveCall {
            package: package.to_string(),
            module: module.to_string(),
            function: function.to_string(),
            type_arguments: vec![SUI_TYPE.to_string()],
            arguments,
        })
    }

    pub fn build(self) -> TransactionData {
        self.tx
    }
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}
