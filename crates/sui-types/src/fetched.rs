//! Types for data fetched from the chain.
//!
//! Object and package IDs use `String` rather than `AccountAddress` to keep
//! JSON boundaries simple; owners use `AccountAddress` since analyzers compare
//! them against the transaction sender.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use move_core_types::account_address::AccountAddress;

use crate::encoding::normalize_address;

/// Object ID type (32-byte address).
pub type ObjectID = AccountAddress;

/// Owner descriptor of an on-chain object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ObjectOwner {
    /// Owned by an account address
    AddressOwner { address: AccountAddress },

    /// Owned by another object (dynamic field child, wrapped object)
    ObjectOwner { address: AccountAddress },

    /// Owned by an address but sequenced through consensus
    ConsensusAddressOwner {
        owner: AccountAddress,
        start_version: u64,
    },

    /// Shared object
    Shared { initial_shared_version: u64 },

    /// Frozen object
    Immutable,

    /// An owner kind this client does not know
    #[serde(other)]
    Unknown,
}

impl ObjectOwner {
    pub fn address(address: AccountAddress) -> Self {
        ObjectOwner::AddressOwner { address }
    }
}

/// Fetched object data from the Sui network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedObject {
    /// Object ID (hex string with 0x prefix).
    pub object_id: String,

    /// Object version (sequence number / lamport timestamp).
    pub version: u64,

    /// BCS-serialized Move struct contents.
    #[serde(with = "crate::transaction::base64_bytes")]
    pub bcs_bytes: Vec<u8>,

    /// Move type tag (e.g., "0x2::coin::Coin<0x2::sui::SUI>").
    ///
    /// None for packages or when type information is unavailable.
    pub type_string: Option<String>,

    pub owner: ObjectOwner,

    /// Object digest (base58 encoded, for verification).
    #[serde(default)]
    pub digest: Option<String>,
}

impl FetchedObject {
    /// Create an object with minimal fields; the owner defaults to immutable.
    pub fn new(object_id: impl Into<String>, version: u64, bcs_bytes: Vec<u8>) -> Self {
        Self {
            object_id: object_id.into(),
            version,
            bcs_bytes,
            type_string: None,
            owner: ObjectOwner::Immutable,
            digest: None,
        }
    }

    /// Builder: set type string.
    pub fn with_type(mut self, type_string: impl Into<String>) -> Self {
        self.type_string = Some(type_string.into());
        self
    }

    /// Builder: set owner.
    pub fn with_owner(mut self, owner: ObjectOwner) -> Self {
        self.owner = owner;
        self
    }

    /// Builder: mark as shared.
    pub fn shared(mut self, initial_shared_version: u64) -> Self {
        self.owner = ObjectOwner::Shared {
            initial_shared_version,
        };
        self
    }

    /// Builder: set digest.
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    /// The object ID in canonical 64-hex form.
    pub fn normalized_id(&self) -> String {
        normalize_address(&self.object_id)
    }
}

/// BCS layout of `0x2::coin::Coin<T>`: a UID followed by the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinContents {
    pub id: AccountAddress,
    pub balance: u64,
}

impl CoinContents {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bcs::from_bytes(bytes).context("Failed to decode coin contents")
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bcs::to_bytes(self).context("Failed to encode coin contents")
    }
}

/// Reference mode of a Move function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reference {
    Mutable,
    Immutable,
}

/// A parameter or return type of a Move function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSignature {
    /// `&mut T` / `&T`, or None for by-value
    #[serde(default)]
    pub reference: Option<Reference>,

    /// Type string of the referenced or owned value
    pub body: String,
}

impl OpenSignature {
    pub fn by_value(body: impl Into<String>) -> Self {
        Self {
            reference: None,
            body: body.into(),
        }
    }

    pub fn mutable(body: impl Into<String>) -> Self {
        Self {
            reference: Some(Reference::Mutable),
            body: body.into(),
        }
    }

    pub fn immutable(body: impl Into<String>) -> Self {
        Self {
            reference: Some(Reference::Immutable),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Friend,
    Private,
}

/// Normalized signature of a Move function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFunction {
    /// Package ID (hex string with 0x prefix).
    pub package_id: String,
    pub module_name: String,
    pub name: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub type_parameters: usize,
    pub parameters: Vec<OpenSignature>,
    #[serde(default)]
    pub returns: Vec<OpenSignature>,
}

impl MoveFunction {
    /// Create a public, non-entry function with the given parameters.
    pub fn new(
        package_id: impl Into<String>,
        module_name: impl Into<String>,
        name: impl Into<String>,
        parameters: Vec<OpenSignature>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            module_name: module_name.into(),
            name: name.into(),
            visibility: Visibility::Public,
            is_entry: false,
            type_parameters: 0,
            parameters,
            returns: Vec::new(),
        }
    }

    /// Builder: set return types.
    pub fn with_returns(mut self, returns: Vec<OpenSignature>) -> Self {
        self.returns = returns;
        self
    }

    /// Key used to look this function up: (normalized package, module, name).
    pub fn target(&self) -> (String, String, String) {
        (
            normalize_address(&self.package_id),
            self.module_name.clone(),
            self.name.clone(),
        )
    }
}
