//! Register file of the coin-flow simulation.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::model::{ArgumentKind, ResolvedCommandArgument, ResolvedInput};

/// Signed coin amount. Wide enough that sums of `u64` balances never
/// overflow and that malformed transactions can drive a register negative.
pub type Amount = i128;

/// Where a value lives while the command sequence is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Gas,
    Input(u16),
    Result { command: u16, slot: u16 },
}

impl Location {
    /// Location an argument reads from. None for arguments that cannot hold
    /// a coin.
    pub fn of(argument: &ResolvedCommandArgument) -> Option<Location> {
        match &argument.kind {
            ArgumentKind::GasCoin => Some(Location::Gas),
            ArgumentKind::Input(input) => Some(Location::Input(input.index())),
            ArgumentKind::Result { command, slot } => Some(Location::Result {
                command: *command,
                slot: *slot,
            }),
            ArgumentKind::Unknown => None,
        }
    }

    pub fn of_input(input: &ResolvedInput) -> Location {
        Location::Input(input.index())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Gas => write!(f, "gas"),
            Location::Input(index) => write!(f, "input:{}", index),
            Location::Result { command, slot } => write!(f, "result:{},{}", command, slot),
        }
    }
}

/// One register: a coin value followed through the command sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedCoin {
    pub coin_type: String,
    pub initial_balance: Amount,
    pub remaining_balance: Amount,
    /// The sender held this value before the transaction
    pub owned: bool,
    pub consumed: bool,
}

impl TrackedCoin {
    pub fn new(coin_type: impl Into<String>, balance: Amount, owned: bool) -> Self {
        Self {
            coin_type: coin_type.into(),
            initial_balance: balance,
            remaining_balance: balance,
            owned,
            consumed: false,
        }
    }

    /// Give the whole remaining value away. Idempotent.
    pub fn consume(&mut self) {
        self.remaining_balance = 0;
        self.consumed = true;
    }

    /// What the sender lost through this register.
    pub fn outflow(&self) -> Amount {
        self.initial_balance - self.remaining_balance
    }
}

/// Net amount of one coin type leaving the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinFlow {
    pub coin_type: String,
    pub amount: Amount,
}

/// Registers of one simulation pass, in creation order.
#[derive(Debug, Default)]
pub struct CoinLedger {
    order: Vec<Location>,
    coins: HashMap<Location, TrackedCoin>,
}

impl CoinLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `coin` at `location`, replacing any register already there.
    pub fn insert(&mut self, location: Location, coin: TrackedCoin) {
        if self.coins.insert(location, coin).is_none() {
            self.order.push(location);
        }
    }

    pub fn get(&self, location: Location) -> Option<&TrackedCoin> {
        self.coins.get(&location)
    }

    pub fn get_mut(&mut self, location: Location) -> Option<&mut TrackedCoin> {
        self.coins.get_mut(&location)
    }

    /// Consume the register at `location`, returning what it held.
    pub fn consume(&mut self, location: Location) -> Option<Amount> {
        let coin = self.coins.get_mut(&location)?;
        let remaining = coin.remaining_balance;
        coin.consume();
        Some(remaining)
    }

    /// A transfer of `from` back to the sender: its remaining value is
    /// credited to the gas register, whatever its coin type, and `from` is
    /// consumed afterwards. Folding the gas register into itself therefore
    /// ends with gas consumed.
    pub fn fold_self_transfer_into_gas(&mut self, from: Location) {
        let Some(remaining) = self.get(from).map(|coin| coin.remaining_balance) else {
            return;
        };
        if let Some(gas) = self.get_mut(Location::Gas) {
            gas.remaining_balance += remaining;
        }
        self.consume(from);
    }

    /// Net outflow per coin type over owned registers. Types appear in the
    /// order their first owned register was created.
    pub fn outflows(&self) -> Vec<CoinFlow> {
        let mut flows: Vec<CoinFlow> = Vec::new();
        for coin in self.order.iter().filter_map(|location| self.coins.get(location)) {
            if !coin.owned {
                continue;
            }
            match flows.iter_mut().find(|flow| flow.coin_type == coin.coin_type) {
                Some(flow) => flow.amount += coin.outflow(),
                None => flows.push(CoinFlow {
                    coin_type: coin.coin_type.clone(),
                    amount: coin.outflow(),
                }),
            }
        }
        flows
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
