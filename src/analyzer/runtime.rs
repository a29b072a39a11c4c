//! Evaluation of an analyzer DAG for one transaction.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use super::{
    downcast, merge_issues, Analyzer, AnalyzerKey, AnalyzerResult, AnalyzerSet, ErasedAnalyzer,
    ErasedResult, Issue, Resolved,
};
use crate::options::{AnalysisContext, AnalyzerOptions};

type SharedAnalysis = Shared<BoxFuture<'static, ErasedResult>>;

const UNEXPECTED_ERROR: &str = "Unexpected error while analyzing transaction";

/// A memoized analysis. The analyzer is held for the whole run so an
/// instance key (its address) cannot be reused by another allocation.
struct MemoEntry {
    _analyzer: Arc<dyn ErasedAnalyzer>,
    analysis: SharedAnalysis,
}

/// State of a single `run` call. Nothing here outlives it.
struct RunState {
    ctx: AnalysisContext,
    memo: Mutex<HashMap<AnalyzerKey, MemoEntry>>,
}

/// Evaluate `analyzers` (and everything they depend on) for one transaction.
///
/// Fails only if the transaction payload cannot be decoded; every analysis
/// failure is reported as issues in the returned results.
pub async fn run(analyzers: AnalyzerSet, options: AnalyzerOptions) -> Result<AnalysisResults> {
    let transaction = options.transaction.decode()?;
    let log_issues = options.config.log_issues;
    let state = Arc::new(RunState {
        ctx: AnalysisContext::new(options, transaction),
        memo: Mutex::new(HashMap::new()),
    });

    debug!(roots = analyzers.len(), "starting transaction analysis");
    let pending = analyzers.entries().iter().map(|(name, analyzer)| {
        let analysis = analysis_for(&state, analyzer);
        async move { (name.clone(), analysis.await) }
    });
    let entries = join_all(pending).await;

    let executed = {
        let mut memo = state.memo.lock();
        let executed = memo.len();
        // memoized futures hold the state; drop them so the run can be freed
        memo.clear();
        executed
    };
    debug!(executed, "transaction analysis finished");

    if log_issues {
        for (name, result) in &entries {
            if let ErasedResult::Issues(issues) = result {
                for issue in issues.iter() {
                    warn!(analyzer = %name, issue = %issue.message, "analysis issue");
                }
            }
        }
    }

    Ok(AnalysisResults { entries })
}

/// The memoized analysis for `analyzer`, created on first request.
fn analysis_for(state: &Arc<RunState>, analyzer: &Arc<dyn ErasedAnalyzer>) -> SharedAnalysis {
    let key = analyzer.key();
    let mut memo = state.memo.lock();
    if let Some(existing) = memo.get(&key) {
        trace!(analyzer = analyzer.label(), "reusing memoized analysis");
        return existing.analysis.clone();
    }
    let analysis = evaluate(state.clone(), analyzer.clone()).shared();
    memo.insert(
        key,
        MemoEntry {
            _analyzer: analyzer.clone(),
            analysis: analysis.clone(),
        },
    );
    analysis
}

fn evaluate(
    state: Arc<RunState>,
    analyzer: Arc<dyn ErasedAnalyzer>,
) -> BoxFuture<'static, ErasedResult> {
    async move {
        let label = analyzer.label();
        let dependencies = analyzer.dependency_set();
        let pending = dependencies.entries().iter().map(|(name, dependency)| {
            let analysis = analysis_for(&state, dependency);
            async move { (name.clone(), analysis.await) }
        });
        let settled = join_all(pending).await;

        let mut issues: Vec<Issue> = Vec::new();
        let mut outputs = HashMap::with_capacity(settled.len());
        for (name, result) in settled {
            match result {
                ErasedResult::Result(output) => {
                    outputs.insert(name, output);
                }
                ErasedResult::Issues(upstream) => merge_issues(&mut issues, &upstream),
            }
        }
        if !issues.is_empty() {
            debug!(
                analyzer = label,
                issues = issues.len(),
                "skipping analyzer, dependencies reported issues"
            );
            return ErasedResult::Issues(issues.into());
        }

        debug!(analyzer = label, "running analyzer");
        let resolved = Resolved::new(outputs);
        let step = AssertUnwindSafe(analyzer.run_step(&state.ctx, &resolved))
            .catch_unwind()
            .await;
        match step {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => unexpected_error(label, err),
            Err(panic) => unexpected_error(label, anyhow!(panic_message(panic.as_ref()))),
        }
    }
    .boxed()
}

fn unexpected_error(analyzer: &str, err: anyhow::Error) -> ErasedResult {
    warn!(analyzer, error = %format!("{:#}", err), "analyzer failed unexpectedly");
    let message = format!("{}: {}", UNEXPECTED_ERROR, err);
    ErasedResult::Issues(vec![Issue::with_cause(message, err)].into())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "analyzer panicked".to_string()
    }
}

/// Results of a run, one per root analyzer, in root order.
pub struct AnalysisResults {
    entries: Vec<(String, ErasedResult)>,
}

impl AnalysisResults {
    /// Typed result of the root registered as `name`.
    ///
    /// Fails if there is no such root or it is not an `A`.
    pub fn get<A: Analyzer>(&self, name: &str) -> Result<AnalyzerResult<Arc<A::Output>>> {
        match self.entry(name)? {
            ErasedResult::Result(output) => Ok(AnalyzerResult::Result(downcast::<A>(name, output)?)),
            ErasedResult::Issues(issues) => Ok(AnalyzerResult::Issues(issues.to_vec())),
        }
    }

    /// Issues reported by the root `name`; empty if it succeeded or is unknown.
    pub fn issues(&self, name: &str) -> &[Issue] {
        match self.entry(name) {
            Ok(ErasedResult::Issues(issues)) => issues,
            _ => &[],
        }
    }

    pub fn is_ok(&self, name: &str) -> bool {
        matches!(self.entry(name), Ok(ErasedResult::Result(_)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    fn entry(&self, name: &str) -> Result<&ErasedResult> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, result)| result)
            .ok_or_else(|| anyhow!("No analyzer named '{}' in this run", name))
    }
}
