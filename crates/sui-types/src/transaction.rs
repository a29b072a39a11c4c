//! Decoded transaction data consumed by the analyzers.
//!
//! These types mirror the shape a transaction decoder hands over: the sender,
//! gas configuration, an ordered list of inputs and an ordered list of
//! Programmable Transaction Block commands. Shapes the decoder could not make
//! sense of are kept as `Unknown` variants so that analyzers can report them
//! instead of failing deserialization outright.

use anyhow::{Context, Result};
use move_core_types::account_address::AccountAddress;
use serde::{Deserialize, Serialize};

use crate::encoding::normalize_address;

/// A decoded transaction, ready for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    /// Sender address
    pub sender: AccountAddress,

    /// Gas configuration
    #[serde(default)]
    pub gas_data: GasData,

    /// Inputs in declaration order
    #[serde(default)]
    pub inputs: Vec<TransactionInput>,

    /// The PTB commands in execution order
    #[serde(default)]
    pub commands: Vec<PtbCommand>,
}

impl TransactionData {
    /// Create an empty transaction for `sender`.
    pub fn new(sender: AccountAddress) -> Self {
        Self {
            sender,
            gas_data: GasData::default(),
            inputs: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Decode a transaction from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to decode transaction JSON")
    }

    /// Builder: set the gas payment objects.
    pub fn with_gas_payment(mut self, payment: Vec<ObjectRef>) -> Self {
        self.gas_data.payment = payment;
        self
    }

    /// Builder: set the gas budget.
    pub fn with_gas_budget(mut self, budget: u64) -> Self {
        self.gas_data.budget = Some(budget);
        self
    }

    /// Builder: set the gas price.
    pub fn with_gas_price(mut self, price: u64) -> Self {
        self.gas_data.price = Some(price);
        self
    }

    /// Append an input and return its index.
    pub fn push_input(&mut self, input: TransactionInput) -> u16 {
        self.inputs.push(input);
        (self.inputs.len() - 1) as u16
    }

    /// Append a command and return its index.
    pub fn push_command(&mut self, command: PtbCommand) -> u16 {
        self.commands.push(command);
        (self.commands.len() - 1) as u16
    }
}

/// Gas configuration of a transaction.
///
/// Budget and price stay optional: a half-built transaction may not have
/// them set yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GasData {
    /// Coins paying for gas
    #[serde(default)]
    pub payment: Vec<ObjectRef>,

    /// Gas owner, when sponsored
    #[serde(default)]
    pub owner: Option<AccountAddress>,

    #[serde(default)]
    pub price: Option<u64>,

    #[serde(default)]
    pub budget: Option<u64>,
}

/// Reference to a specific object version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: String,
    pub version: u64,
    pub digest: String,
}

impl ObjectRef {
    pub fn new(object_id: impl Into<String>, version: u64, digest: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            version,
            digest: digest.into(),
        }
    }

    /// The object ID in canonical 64-hex form.
    pub fn normalized_id(&self) -> String {
        normalize_address(&self.object_id)
    }
}

/// A command in a Programmable Transaction Block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PtbCommand {
    /// Move function call
    MoveCall {
        package: String,
        module: String,
        function: String,
        #[serde(default)]
        type_arguments: Vec<String>,
        arguments: Vec<PtbArgument>,
    },

    /// Split coins
    SplitCoins {
        coin: PtbArgument,
        amounts: Vec<PtbArgument>,
    },

    /// Merge coins
    MergeCoins {
        destination: PtbArgument,
        sources: Vec<PtbArgument>,
    },

    /// Transfer objects
    TransferObjects {
        objects: Vec<PtbArgument>,
        address: PtbArgument,
    },

    /// Make move vector
    MakeMoveVec {
        type_arg: Option<String>,
        elements: Vec<PtbArgument>,
    },

    /// Publish new package
    Publish {
        modules: Vec<String>, // base64 encoded
        dependencies: Vec<String>,
    },

    /// Upgrade package
    Upgrade {
        modules: Vec<String>,
        #[serde(default)]
        dependencies: Vec<String>,
        package: String,
        ticket: PtbArgument,
    },

    /// Unexpanded transaction intent (e.g. `CoinWithBalance`)
    #[serde(rename = "$Intent")]
    Intent {
        #[serde(default)]
        name: String,
    },

    /// A command kind this decoder does not know
    #[serde(other)]
    Unknown,
}

impl PtbCommand {
    /// Short name of the command kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PtbCommand::MoveCall { .. } => "MoveCall",
            PtbCommand::SplitCoins { .. } => "SplitCoins",
            PtbCommand::MergeCoins { .. } => "MergeCoins",
            PtbCommand::TransferObjects { .. } => "TransferObjects",
            PtbCommand::MakeMoveVec { .. } => "MakeMoveVec",
            PtbCommand::Publish { .. } => "Publish",
            PtbCommand::Upgrade { .. } => "Upgrade",
            PtbCommand::Intent { .. } => "$Intent",
            PtbCommand::Unknown => "Unknown",
        }
    }
}

/// Argument reference in a PTB command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PtbArgument {
    /// Reference to a transaction input
    Input { index: u16 },

    /// Reference to a previous command result
    Result { index: u16 },

    /// Reference to a nested result (for multi-return functions)
    NestedResult { index: u16, result_index: u16 },

    /// Gas coin (special input)
    GasCoin,

    /// An argument shape this decoder does not know
    #[serde(other)]
    Unknown,
}

/// Transaction input object or pure value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionInput {
    /// Pure BCS-encoded value
    Pure {
        #[serde(with = "base64_bytes")]
        bytes: Vec<u8>,
    },

    /// Object reference (owned)
    Object {
        object_id: String,
        version: u64,
        digest: String,
    },

    /// Shared object reference
    SharedObject {
        object_id: String,
        initial_shared_version: u64,
        mutable: bool,
    },

    /// Immutable object (e.g., package, Clock)
    ImmutableObject {
        object_id: String,
        version: u64,
        digest: String,
    },

    /// Receiving object
    Receiving {
        object_id: String,
        version: u64,
        digest: String,
    },

    /// Object input whose version and ownership were never resolved
    UnresolvedObject { object_id: String },

    /// Pure input still carrying an unserialized value
    UnresolvedPure { value: serde_json::Value },

    /// An input shape this decoder does not know
    #[serde(other)]
    Unknown,
}

impl TransactionInput {
    /// Pure input holding the BCS encoding of `value`.
    pub fn pure<T: Serialize>(value: &T) -> Result<Self> {
        let bytes = bcs::to_bytes(value).context("Failed to BCS-encode pure input")?;
        Ok(TransactionInput::Pure { bytes })
    }

    /// Owned or immutable object input.
    pub fn object(object_id: impl Into<String>, version: u64, digest: impl Into<String>) -> Self {
        TransactionInput::Object {
            object_id: object_id.into(),
            version,
            digest: digest.into(),
        }
    }

    /// Shared object input.
    pub fn shared(object_id: impl Into<String>, initial_shared_version: u64, mutable: bool) -> Self {
        TransactionInput::SharedObject {
            object_id: object_id.into(),
            initial_shared_version,
            mutable,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TransactionInput::Pure { .. } => "Pure",
            TransactionInput::Object { .. } => "Object",
            TransactionInput::SharedObject { .. } => "SharedObject",
            TransactionInput::ImmutableObject { .. } => "ImmutableObject",
            TransactionInput::Receiving { .. } => "Receiving",
            TransactionInput::UnresolvedObject { .. } => "UnresolvedObject",
            TransactionInput::UnresolvedPure { .. } => "UnresolvedPure",
            TransactionInput::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

/// Serde helper for base64 encoding/decoding Vec<u8>
pub mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Vec<u8>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(&s)
            .map_err(serde::de::Error::custom)
    }
}
