//! Signatures of the Move functions a transaction calls.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tracing::debug;

use sui_analyzer_types::encoding::normalize_address;
use sui_analyzer_types::{MoveFunction, PtbCommand, TransactionData};

use super::core::{data, Data};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Issue, Resolved};
use crate::options::AnalysisContext;

/// (normalized package, module, function)
pub type FunctionKey = (String, String, String);

pub struct MoveFunctions;

#[async_trait::async_trait]
impl Analyzer for MoveFunctions {
    type Output = HashMap<FunctionKey, Arc<MoveFunction>>;

    fn name(&self) -> &'static str {
        "move_functions"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new().with("data", data())
    }

    async fn analyze(
        &self,
        ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Self::Output>> {
        let tx = deps.get::<Data>("data")?;
        let targets = call_targets(&tx);
        if targets.is_empty() {
            return Ok(AnalyzerResult::Result(HashMap::new()));
        }

        let chain = ctx.chain()?;
        debug!(functions = targets.len(), "fetching Move function signatures");
        let fetched = join_all(targets.iter().map(|(package, module, function)| {
            chain.get_move_function(package, module, function)
        }))
        .await;

        let mut functions = HashMap::with_capacity(targets.len());
        let mut issues = Vec::new();
        for (key, entry) in targets.into_iter().zip(fetched) {
            match entry {
                Ok(function) => {
                    functions.insert(key, Arc::new(function));
                }
                Err(err) => {
                    let message = format!(
                        "Failed to fetch Move function {}::{}::{}: {}",
                        key.0, key.1, key.2, err
                    );
                    issues.push(Issue::with_cause(message, err));
                }
            }
        }
        Ok(AnalyzerResult::from_parts(functions, issues))
    }
}

/// Distinct call targets in command order.
fn call_targets(tx: &TransactionData) -> Vec<FunctionKey> {
    let mut seen = HashSet::new();
    tx.commands
        .iter()
        .filter_map(|command| match command {
            PtbCommand::MoveCall {
                package,
                module,
                function,
                ..
            } => Some((normalize_address(package), module.clone(), function.clone())),
            _ => None,
        })
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

singleton!(pub fn move_functions() -> MoveFunctions);
