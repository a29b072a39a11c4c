//! Coin-flow simulation.
//!
//! Replays resolved commands over a [`CoinLedger`] to find how much of each
//! coin type leaves the sender. Registers are seeded from the gas payment
//! (minus the budget) and from every coin object input. Splits move value
//! into scratch registers, merges move it back, and transfers, vectors and
//! Move calls consume whatever they touch. An amount that is not known
//! statically consumes its whole source coin, so results only ever
//! over-estimate.

mod ledger;

pub use ledger::{Amount, CoinFlow, CoinLedger, Location, TrackedCoin};

use std::collections::HashMap;

use anyhow::Result;
use move_core_types::account_address::AccountAddress;
use serde::Serialize;
use tracing::{debug, trace};

use sui_analyzer_types::encoding::{decode_pure_address, decode_pure_u64};
use sui_analyzer_types::TransactionData;

use crate::analyzer::{AnalyzerResult, Issue};
use crate::model::{AnalyzedCoin, ResolvedCommand, ResolvedCommandArgument, ResolvedInput};

pub const GAS_BUDGET_NOT_SET: &str = "Gas budget not set in Transaction";

/// Net outflow per coin type, in the order each type was first tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinFlowSummary {
    pub outflows: Vec<CoinFlow>,
}

impl CoinFlowSummary {
    /// Outflow of `coin_type` (canonical spelling), if tracked.
    pub fn outflow(&self, coin_type: &str) -> Option<Amount> {
        self.outflows
            .iter()
            .find(|flow| flow.coin_type == coin_type)
            .map(|flow| flow.amount)
    }
}

/// Everything one simulation pass reads.
pub struct SimulationInput<'a> {
    pub transaction: &'a TransactionData,
    pub inputs: &'a [ResolvedInput],
    pub commands: &'a [ResolvedCommand],
    pub coins: &'a HashMap<String, AnalyzedCoin>,
    pub gas_coins: &'a [AnalyzedCoin],
    /// Canonical type of the gas coin
    pub native_coin_type: &'a str,
}

/// Run the simulation.
///
/// A missing gas budget is an issue. Malformed pure amounts or addresses
/// are errors.
pub fn simulate(input: SimulationInput<'_>) -> Result<AnalyzerResult<CoinFlowSummary>> {
    let mut issues = Vec::new();
    let mut ledger = seed_ledger(&input, &mut issues);
    let sender = input.transaction.sender;

    for command in input.commands {
        trace!(command = command.index(), kind = command.kind(), "simulating command");
        apply(&mut ledger, command, sender)?;
    }

    let outflows = ledger.outflows();
    debug!(
        registers = ledger.len(),
        coin_types = outflows.len(),
        "coin flow simulation finished"
    );
    Ok(AnalyzerResult::from_parts(CoinFlowSummary { outflows }, issues))
}

fn seed_ledger(input: &SimulationInput<'_>, issues: &mut Vec<Issue>) -> CoinLedger {
    let mut ledger = CoinLedger::new();

    let gas_balance: Amount = input
        .gas_coins
        .iter()
        .map(|coin| Amount::from(coin.balance))
        .sum();
    let mut gas = TrackedCoin::new(input.native_coin_type, gas_balance, true);
    match input.transaction.gas_data.budget {
        Some(budget) => gas.remaining_balance -= Amount::from(budget),
        None => issues.push(Issue::new(GAS_BUDGET_NOT_SET)),
    }
    ledger.insert(Location::Gas, gas);

    for resolved in input.inputs {
        let Some(object) = resolved.object() else {
            continue;
        };
        if let Some(coin) = input.coins.get(&object.id) {
            ledger.insert(
                Location::of_input(resolved),
                TrackedCoin::new(coin.coin_type.clone(), Amount::from(coin.balance), true),
            );
        }
    }

    ledger
}

fn apply(ledger: &mut CoinLedger, command: &ResolvedCommand, sender: AccountAddress) -> Result<()> {
    match command {
        ResolvedCommand::SplitCoins {
            index,
            coin,
            amounts,
        } => {
            let Some(source) = Location::of(coin).filter(|at| ledger.get(*at).is_some()) else {
                return Ok(());
            };
            let Some(literals) = pure_amounts(amounts)? else {
                ledger.consume(source);
                return Ok(());
            };
            let Some(source_coin) = ledger.get_mut(source) else {
                return Ok(());
            };
            source_coin.remaining_balance -= literals.iter().sum::<Amount>();
            let coin_type = source_coin.coin_type.clone();
            for (slot, amount) in literals.into_iter().enumerate() {
                ledger.insert(
                    Location::Result {
                        command: *index,
                        slot: slot as u16,
                    },
                    TrackedCoin::new(coin_type.clone(), amount, false),
                );
            }
        }
        ResolvedCommand::MergeCoins {
            destination,
            sources,
            ..
        } => {
            let mut total: Amount = 0;
            for location in sources.iter().filter_map(Location::of) {
                total += ledger.consume(location).unwrap_or(0);
            }
            if let Some(dest) = Location::of(destination).and_then(|at| ledger.get_mut(at)) {
                dest.remaining_balance += total;
            }
        }
        ResolvedCommand::TransferObjects {
            objects, address, ..
        } => {
            let recipient = match address.pure_bytes() {
                Some(bytes) => Some(decode_pure_address(bytes)?),
                None => None,
            };
            for location in objects.iter().filter_map(Location::of) {
                if ledger.get(location).is_none() {
                    continue;
                }
                if recipient == Some(sender) {
                    ledger.fold_self_transfer_into_gas(location);
                } else {
                    ledger.consume(location);
                }
            }
        }
        ResolvedCommand::MakeMoveVec { elements, .. } => consume_all(ledger, elements),
        ResolvedCommand::MoveCall { arguments, .. } => consume_all(ledger, arguments),
        ResolvedCommand::Publish { .. } | ResolvedCommand::Upgrade { .. } => {}
    }
    Ok(())
}

/// Literal split amounts, or None if any amount is only known at runtime.
fn pure_amounts(amounts: &[ResolvedCommandArgument]) -> Result<Option<Vec<Amount>>> {
    let mut literals = Vec::with_capacity(amounts.len());
    for amount in amounts {
        let Some(bytes) = amount.pure_bytes() else {
            return Ok(None);
        };
        literals.push(Amount::from(decode_pure_u64(bytes)?));
    }
    Ok(Some(literals))
}

fn consume_all(ledger: &mut CoinLedger, arguments: &[ResolvedCommandArgument]) {
    for location in arguments.iter().filter_map(Location::of) {
        ledger.consume(location);
    }
}
