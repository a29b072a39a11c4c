//! Resolved view of a transaction.
//!
//! Raw inputs and commands only refer to each other by index. The rules in
//! [`crate::rules`] join them with fetched chain data into the types below, so
//! later rules (coin flows, classification) can work on fully typed values.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;
use serde::Serialize;

use sui_analyzer_types::{FetchedObject, MoveFunction, Reference};

/// A fetched object together with the address that owns it, if any.
#[derive(Debug, Clone)]
pub struct AnalyzedObject {
    /// Normalized object ID
    pub id: String,
    pub object: FetchedObject,
    /// Owning address for address-, object- and consensus-owned objects
    pub owner_address: Option<AccountAddress>,
}

/// An object of type `0x2::coin::Coin<T>`.
#[derive(Debug, Clone)]
pub struct AnalyzedCoin {
    pub object: Arc<AnalyzedObject>,
    /// Canonical spelling of `T`
    pub coin_type: String,
    pub balance: u64,
}

impl AnalyzedCoin {
    pub fn id(&self) -> &str {
        &self.object.id
    }
}

/// How an object input is passed to the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectInputKind {
    ImmOrOwned,
    Shared { mutable: bool },
    Receiving,
}

#[derive(Debug, Clone)]
pub enum ResolvedInput {
    Pure {
        index: u16,
        bytes: Vec<u8>,
    },
    Object {
        index: u16,
        kind: ObjectInputKind,
        object: Arc<AnalyzedObject>,
    },
}

impl ResolvedInput {
    pub fn index(&self) -> u16 {
        match self {
            ResolvedInput::Pure { index, .. } | ResolvedInput::Object { index, .. } => *index,
        }
    }

    pub fn object(&self) -> Option<&Arc<AnalyzedObject>> {
        match self {
            ResolvedInput::Object { object, .. } => Some(object),
            ResolvedInput::Pure { .. } => None,
        }
    }
}

/// What a command does with an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Read,
    Mutate,
    Transfer,
}

impl AccessLevel {
    /// Access implied by a Move parameter's reference mode.
    pub fn for_parameter(reference: Option<Reference>) -> Self {
        match reference {
            Some(Reference::Mutable) => AccessLevel::Mutate,
            Some(Reference::Immutable) => AccessLevel::Read,
            None => AccessLevel::Transfer,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ArgumentKind {
    GasCoin,
    Input(ResolvedInput),
    /// Slot `slot` of the result of command `command`
    Result {
        command: u16,
        slot: u16,
    },
    /// Argument that could not be resolved
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ResolvedCommandArgument {
    pub kind: ArgumentKind,
    pub access: AccessLevel,
}

impl ResolvedCommandArgument {
    pub fn new(kind: ArgumentKind, access: AccessLevel) -> Self {
        Self { kind, access }
    }

    /// Bytes of a pure input argument.
    pub fn pure_bytes(&self) -> Option<&[u8]> {
        match &self.kind {
            ArgumentKind::Input(ResolvedInput::Pure { bytes, .. }) => Some(bytes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    MoveCall {
        index: u16,
        package: String,
        module: String,
        function: String,
        type_arguments: Vec<String>,
        arguments: Vec<ResolvedCommandArgument>,
        signature: Arc<MoveFunction>,
    },
    TransferObjects {
        index: u16,
        objects: Vec<ResolvedCommandArgument>,
        address: ResolvedCommandArgument,
    },
    SplitCoins {
        index: u16,
        coin: ResolvedCommandArgument,
        amounts: Vec<ResolvedCommandArgument>,
    },
    MergeCoins {
        index: u16,
        destination: ResolvedCommandArgument,
        sources: Vec<ResolvedCommandArgument>,
    },
    MakeMoveVec {
        index: u16,
        type_arg: Option<String>,
        elements: Vec<ResolvedCommandArgument>,
    },
    Publish {
        index: u16,
        dependencies: Vec<String>,
    },
    Upgrade {
        index: u16,
        package: String,
        ticket: ResolvedCommandArgument,
    },
}

impl ResolvedCommand {
    pub fn index(&self) -> u16 {
        match self {
            ResolvedCommand::MoveCall { index, .. }
            | ResolvedCommand::TransferObjects { index, .. }
            | ResolvedCommand::SplitCoins { index, .. }
            | ResolvedCommand::MergeCoins { index, .. }
            | ResolvedCommand::MakeMoveVec { index, .. }
            | ResolvedCommand::Publish { index, .. }
            | ResolvedCommand::Upgrade { index, .. } => *index,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedCommand::MoveCall { .. } => "MoveCall",
            ResolvedCommand::TransferObjects { .. } => "TransferObjects",
            ResolvedCommand::SplitCoins { .. } => "SplitCoins",
            ResolvedCommand::MergeCoins { .. } => "MergeCoins",
            ResolvedCommand::MakeMoveVec { .. } => "MakeMoveVec",
            ResolvedCommand::Publish { .. } => "Publish",
            ResolvedCommand::Upgrade { .. } => "Upgrade",
        }
    }
}
