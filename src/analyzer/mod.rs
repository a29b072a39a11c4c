//! Dependency-aware analyzer runtime.
//!
//! An [`Analyzer`] is a small rule that declares other analyzers as named
//! dependencies and produces an [`AnalyzerResult`] from their outputs. The
//! runtime ([`run`]) evaluates everything reachable from a set of roots:
//!
//! - each identity ([`AnalyzerKey`]) executes at most once per run, and every
//!   consumer sees the same `Arc` of its output
//! - a node runs only after all of its dependencies settled
//! - a node whose dependencies reported issues does not run; it reports the
//!   de-duplicated union of those issues instead
//! - a step that fails or panics becomes a single
//!   `Unexpected error while analyzing transaction: ...` issue
//!
//! # Example
//!
//! ```ignore
//! use sui_tx_analyzer::{run, rules, AnalyzerOptions, AnalyzerSet};
//!
//! let results = run(
//!     AnalyzerSet::new().with("coin_flows", rules::coin_flows()),
//!     AnalyzerOptions::new(tx).with_chain_data(chain),
//! )
//! .await?;
//! let flows = results.get::<rules::CoinFlows>("coin_flows")?;
//! ```

mod result;
mod runtime;

pub use result::{AnalyzerResult, Issue};
pub(crate) use result::merge_issues;
pub use runtime::{run, AnalysisResults};

use std::any::Any;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use futures::FutureExt;

use crate::options::AnalysisContext;

/// A named unit of analysis.
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    /// Explicit identity shared by every instance that returns it.
    ///
    /// Without one, each instance is its own identity.
    fn cache_key(&self) -> Option<&'static str> {
        None
    }

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new()
    }

    /// Produce this analyzer's result from the resolved dependencies.
    ///
    /// Only called when every dependency produced a value.
    async fn analyze(
        &self,
        ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Self::Output>>;
}

/// Identity used to memoize analyzer executions within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyzerKey {
    Named(&'static str),
    /// Address of the analyzer instance
    Instance(usize),
}

pub(crate) type ErasedOutput = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
pub(crate) enum ErasedResult {
    Result(ErasedOutput),
    Issues(Arc<[Issue]>),
}

/// Object-safe view of an [`Analyzer`] used by the runtime.
pub(crate) trait ErasedAnalyzer: Send + Sync {
    fn key(&self) -> AnalyzerKey;
    fn label(&self) -> &'static str;
    fn dependency_set(&self) -> AnalyzerSet;
    fn run_step<'a>(
        &'a self,
        ctx: &'a AnalysisContext,
        deps: &'a Resolved,
    ) -> BoxFuture<'a, Result<ErasedResult>>;
}

impl<A: Analyzer> ErasedAnalyzer for A {
    fn key(&self) -> AnalyzerKey {
        match self.cache_key() {
            Some(key) => AnalyzerKey::Named(key),
            None => AnalyzerKey::Instance(self as *const A as *const () as usize),
        }
    }

    fn label(&self) -> &'static str {
        self.name()
    }

    fn dependency_set(&self) -> AnalyzerSet {
        Analyzer::dependencies(self)
    }

    fn run_step<'a>(
        &'a self,
        ctx: &'a AnalysisContext,
        deps: &'a Resolved,
    ) -> BoxFuture<'a, Result<ErasedResult>> {
        async move {
            Ok(match self.analyze(ctx, deps).await? {
                AnalyzerResult::Result(value) => ErasedResult::Result(Arc::new(value)),
                AnalyzerResult::Issues(issues) => ErasedResult::Issues(issues.into()),
            })
        }
        .boxed()
    }
}

/// Shared handle to an analyzer instance.
pub struct AnalyzerHandle<A: Analyzer> {
    inner: Arc<A>,
}

impl<A: Analyzer> AnalyzerHandle<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            inner: Arc::new(analyzer),
        }
    }

    pub fn key(&self) -> AnalyzerKey {
        ErasedAnalyzer::key(self.inner.as_ref())
    }

    fn erased(&self) -> Arc<dyn ErasedAnalyzer> {
        self.inner.clone()
    }
}

impl<A: Analyzer> Clone for AnalyzerHandle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Analyzer> Deref for AnalyzerHandle<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.inner
    }
}

/// Ordered `name -> analyzer` map, used both for dependency declarations and
/// for the roots of a run.
#[derive(Clone, Default)]
pub struct AnalyzerSet {
    entries: Vec<(String, Arc<dyn ErasedAnalyzer>)>,
}

impl AnalyzerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add `analyzer` under `name`, replacing any previous entry.
    pub fn with<A: Analyzer>(mut self, name: impl Into<String>, analyzer: AnalyzerHandle<A>) -> Self {
        self.insert(name, analyzer);
        self
    }

    pub fn insert<A: Analyzer>(&mut self, name: impl Into<String>, analyzer: AnalyzerHandle<A>) {
        let name = name.into();
        let erased = analyzer.erased();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = erased,
            None => self.entries.push((name, erased)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub(crate) fn entries(&self) -> &[(String, Arc<dyn ErasedAnalyzer>)] {
        &self.entries
    }
}

/// Outputs of an analyzer's dependencies, by declared name.
pub struct Resolved {
    outputs: HashMap<String, ErasedOutput>,
}

impl Resolved {
    pub(crate) fn new(outputs: HashMap<String, ErasedOutput>) -> Self {
        Self { outputs }
    }

    /// Output of the dependency declared as `name`, which must be an `A`.
    pub fn get<A: Analyzer>(&self, name: &str) -> Result<Arc<A::Output>> {
        let output = self
            .outputs
            .get(name)
            .ok_or_else(|| anyhow!("Dependency '{}' was not declared", name))?;
        downcast::<A>(name, output)
    }
}

pub(crate) fn downcast<A: Analyzer>(name: &str, output: &ErasedOutput) -> Result<Arc<A::Output>> {
    output.clone().downcast::<A::Output>().map_err(|_| {
        anyhow!(
            "Analyzer '{}' does not produce {}",
            name,
            std::any::type_name::<A::Output>()
        )
    })
}
