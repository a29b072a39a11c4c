use anyhow::Result;

use sui_analyzer_types::TransactionData;

use crate::analyzer::{Analyzer, AnalyzerResult, Resolved};
use crate::options::AnalysisContext;

/// The decoded transaction, as a dependency.
pub struct Data;

#[async_trait::async_trait]
impl Analyzer for Data {
    type Output = TransactionData;

    fn name(&self) -> &'static str {
        "data"
    }

    async fn analyze(
        &self,
        ctx: &AnalysisContext,
        _deps: &Resolved,
    ) -> Result<AnalyzerResult<TransactionData>> {
        Ok(AnalyzerResult::Result(ctx.transaction().as_ref().clone()))
    }
}

singleton!(pub fn data() -> Data);
