use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use sui_analyzer_types::encoding::normalize_address;
use sui_analyzer_types::TransactionInput;

use super::core::{data, Data};
use super::objects::{objects_by_id, ObjectsById};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Issue, Resolved};
use crate::model::{AnalyzedObject, ObjectInputKind, ResolvedInput};
use crate::options::AnalysisContext;

/// What a raw input turns out to be once unresolved and unknown shapes are
/// ruled out.
pub(crate) enum InputShape<'a> {
    Pure(&'a [u8]),
    Object { id: &'a str, kind: ObjectInputKind },
}

pub(crate) fn classify_input(index: usize, input: &TransactionInput) -> Result<InputShape<'_>, Issue> {
    match input {
        TransactionInput::Pure { bytes } => Ok(InputShape::Pure(bytes)),
        TransactionInput::Object { object_id, .. }
        | TransactionInput::ImmutableObject { object_id, .. } => Ok(InputShape::Object {
            id: object_id,
            kind: ObjectInputKind::ImmOrOwned,
        }),
        TransactionInput::SharedObject {
            object_id, mutable, ..
        } => Ok(InputShape::Object {
            id: object_id,
            kind: ObjectInputKind::Shared { mutable: *mutable },
        }),
        TransactionInput::Receiving { object_id, .. } => Ok(InputShape::Object {
            id: object_id,
            kind: ObjectInputKind::Receiving,
        }),
        TransactionInput::UnresolvedObject { .. } | TransactionInput::UnresolvedPure { .. } => {
            Err(Issue::new(format!("Unexpected unresolved input: {:?}", input)))
        }
        TransactionInput::Unknown => {
            Err(Issue::new(format!("Unknown input type: input {}", index)))
        }
    }
}

/// Inputs joined with their fetched objects.
pub struct Inputs;

#[async_trait::async_trait]
impl Analyzer for Inputs {
    type Output = Vec<ResolvedInput>;

    fn name(&self) -> &'static str {
        "inputs"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new()
            .with("data", data())
            .with("objects_by_id", objects_by_id())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Vec<ResolvedInput>>> {
        let tx = deps.get::<Data>("data")?;
        let objects = deps.get::<ObjectsById>("objects_by_id")?;

        let mut resolved = Vec::with_capacity(tx.inputs.len());
        let mut issues = Vec::new();
        for (index, input) in tx.inputs.iter().enumerate() {
            let position = input_position(index)?;
            match resolve_input(position, input, &objects) {
                Ok(input) => resolved.push(input),
                Err(issue) => issues.push(issue),
            }
        }
        Ok(AnalyzerResult::from_parts(resolved, issues))
    }
}

/// Index of an input as PTB arguments address it.
fn input_position(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| anyhow!("Input index {} does not fit a PTB argument", index))
}

fn resolve_input(
    position: u16,
    input: &TransactionInput,
    objects: &HashMap<String, Arc<AnalyzedObject>>,
) -> Result<ResolvedInput, Issue> {
    match classify_input(usize::from(position), input)? {
        InputShape::Pure(bytes) => Ok(ResolvedInput::Pure {
            index: position,
            bytes: bytes.to_vec(),
        }),
        InputShape::Object { id, kind } => {
            let id = normalize_address(id);
            let object = objects
                .get(&id)
                .ok_or_else(|| Issue::new(format!("Missing object {} for input {}", id, position)))?;
            Ok(ResolvedInput::Object {
                index: position,
                kind,
                object: object.clone(),
            })
        }
    }
}

singleton!(pub fn inputs() -> Inputs);

#[cfg(test)]
mod tests {
    use super::*;
    use sui_analyzer_types::{FetchedObject, ObjectOwner};

    fn object_map(id: &str) -> HashMap<String, Arc<AnalyzedObject>> {
        let id = normalize_address(id);
        let object = AnalyzedObject {
            id: id.clone(),
            object: FetchedObject::new(id.clone(), 1, vec![]).with_owner(ObjectOwner::Immutable),
            owner_address: None,
        };
        HashMap::from([(id, Arc::new(object))])
    }

    #[test]
    fn test_resolve_shared_input() {
        let objects = object_map("0x6");
        let input = TransactionInput::shared("0x6", 1, true);
        match resolve_input(2, &input, &objects).unwrap() {
            ResolvedInput::Object { index, kind, object } => {
                assert_eq!(index, 2);
                assert_eq!(kind, ObjectInputKind::Shared { mutable: true });
                assert_eq!(object.id, normalize_address("0x6"));
            }
            other => panic!("unexpected input {:?}", other),
        }
    }

    #[test]
    fn test_missing_object_is_an_issue() {
        let objects = object_map("0x6");
        let input = TransactionInput::object("0x7", 1, "digest");
        let issue = resolve_input(0, &input, &objects).unwrap_err();
        assert!(issue.message.contains("Missing object"));
    }

    #[test]
    fn test_input_position_bounds() {
        assert_eq!(input_position(65_535).unwrap(), u16::MAX);
        let err = input_position(65_536).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn test_unknown_input_is_an_issue() {
        let issue = classify_input(3, &TransactionInput::Unknown).err().unwrap();
        assert_eq!(issue.message, "Unknown input type: input 3");
    }
}
