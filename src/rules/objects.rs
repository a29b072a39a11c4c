//! Object IDs referenced by a transaction and the objects behind them.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use move_core_types::account_address::AccountAddress;
use tracing::debug;

use sui_analyzer_types::encoding::normalize_address;
use sui_analyzer_types::{FetchedObject, ObjectOwner, TransactionData};
use sui_state_fetcher::fetch_objects_batched;

use super::core::{data, Data};
use super::inputs::{classify_input, InputShape};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Issue, Resolved};
use crate::model::AnalyzedObject;
use crate::options::AnalysisContext;

/// Shared identity of the object fetch. Any analyzer that reports this key is
/// the same node within a run.
pub const OBJECTS_CACHE_KEY: &str = "objects@1.0.0";

/// Unique normalized IDs of object inputs followed by gas payment objects.
pub struct ObjectIds;

#[async_trait::async_trait]
impl Analyzer for ObjectIds {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "object_ids"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new().with("data", data())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Vec<String>>> {
        let tx = deps.get::<Data>("data")?;
        let (ids, issues) = collect_object_ids(&tx);
        Ok(AnalyzerResult::from_parts(ids, issues))
    }
}

fn collect_object_ids(tx: &TransactionData) -> (Vec<String>, Vec<Issue>) {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut issues = Vec::new();

    for (index, input) in tx.inputs.iter().enumerate() {
        match classify_input(index, input) {
            Ok(InputShape::Object { id, .. }) => {
                let id = normalize_address(id);
                if seen.insert(id.clone()) {
                    ids.push(id);
                }
            }
            Ok(InputShape::Pure(_)) => {}
            Err(issue) => issues.push(issue),
        }
    }
    for payment in &tx.gas_data.payment {
        let id = payment.normalized_id();
        if seen.insert(id.clone()) {
            ids.push(id);
        }
    }

    (ids, issues)
}

/// Every object in [`object_ids`], fetched from the chain-data provider.
pub struct Objects;

#[async_trait::async_trait]
impl Analyzer for Objects {
    type Output = Vec<Arc<AnalyzedObject>>;

    fn cache_key(&self) -> Option<&'static str> {
        Some(OBJECTS_CACHE_KEY)
    }

    fn name(&self) -> &'static str {
        "objects"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new().with("object_ids", object_ids())
    }

    async fn analyze(
        &self,
        ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Self::Output>> {
        let ids = deps.get::<ObjectIds>("object_ids")?;
        let chain = ctx.chain()?;
        let fetched = fetch_objects_batched(chain, &ids, ctx.config().object_batch_size).await?;
        debug!(requested = ids.len(), "fetched transaction objects");

        let mut objects = Vec::with_capacity(ids.len());
        let mut issues = Vec::new();
        for (id, entry) in ids.iter().zip(fetched) {
            match entry {
                Ok(object) => match analyze_object(id, object) {
                    Ok(object) => objects.push(Arc::new(object)),
                    Err(issue) => issues.push(issue),
                },
                Err(err) => {
                    issues.push(Issue::with_cause(format!("Failed to fetch object: {}", err), err))
                }
            }
        }
        Ok(AnalyzerResult::from_parts(objects, issues))
    }
}

fn analyze_object(id: &str, object: FetchedObject) -> std::result::Result<AnalyzedObject, Issue> {
    let owner_address = owner_address(&object.owner)
        .ok_or_else(|| Issue::new(format!("Unknown owner type for object {}", id)))?;
    Ok(AnalyzedObject {
        id: id.to_string(),
        object,
        owner_address,
    })
}

/// Owning address of an object: `Some(None)` for shared and immutable
/// objects, None for an owner kind we cannot interpret.
fn owner_address(owner: &ObjectOwner) -> Option<Option<AccountAddress>> {
    match owner {
        ObjectOwner::AddressOwner { address }
        | ObjectOwner::ObjectOwner { address }
        | ObjectOwner::ConsensusAddressOwner { owner: address, .. } => Some(Some(*address)),
        ObjectOwner::Shared { .. } | ObjectOwner::Immutable => Some(None),
        ObjectOwner::Unknown => None,
    }
}

/// Objects that belong to an address.
pub struct OwnedObjects;

#[async_trait::async_trait]
impl Analyzer for OwnedObjects {
    type Output = Vec<Arc<AnalyzedObject>>;

    fn name(&self) -> &'static str {
        "owned_objects"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new().with("objects", objects())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Self::Output>> {
        let objects = deps.get::<Objects>("objects")?;
        Ok(AnalyzerResult::Result(
            objects
                .iter()
                .filter(|object| object.owner_address.is_some())
                .cloned()
                .collect(),
        ))
    }
}

/// Fetched objects keyed by normalized ID.
pub struct ObjectsById;

#[async_trait::async_trait]
impl Analyzer for ObjectsById {
    type Output = HashMap<String, Arc<AnalyzedObject>>;

    fn name(&self) -> &'static str {
        "objects_by_id"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new().with("objects", objects())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Self::Output>> {
        let objects = deps.get::<Objects>("objects")?;
        Ok(AnalyzerResult::Result(
            objects
                .iter()
                .map(|object| (object.id.clone(), object.clone()))
                .collect(),
        ))
    }
}

singleton!(pub fn object_ids() -> ObjectIds);
singleton!(pub fn objects() -> Objects);
singleton!(pub fn owned_objects() -> OwnedObjects);
singleton!(pub fn objects_by_id() -> ObjectsById);
