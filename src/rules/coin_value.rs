use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use super::coin_flows::{coin_flows, CoinFlows};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Resolved};
use crate::options::AnalysisContext;
use crate::simulation::{Amount, CoinFlow};
use sui_state_fetcher::CoinPrice;

/// Value of one coin type's outflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinValue {
    pub coin_type: String,
    pub decimals: u8,
    pub price: f64,
    pub amount: Amount,
    /// `amount` in whole units times `price`
    pub converted_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinValueSummary {
    pub coin_types: Vec<CoinValue>,
    /// Outflow types the price provider had no price for
    pub coin_types_without_price: Vec<String>,
    pub total: f64,
}

/// Outflows priced through the configured [`PriceProvider`](sui_state_fetcher::PriceProvider).
pub struct CoinValues;

#[async_trait::async_trait]
impl Analyzer for CoinValues {
    type Output = CoinValueSummary;

    fn name(&self) -> &'static str {
        "coin_values"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new().with("coin_flows", coin_flows())
    }

    async fn analyze(
        &self,
        ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<CoinValueSummary>> {
        let flows = deps.get::<CoinFlows>("coin_flows")?;
        let coin_types: Vec<String> = flows
            .outflows
            .iter()
            .map(|flow| flow.coin_type.clone())
            .collect();
        let prices = ctx.prices()?.get_prices(&coin_types).await?;
        debug!(coin_types = coin_types.len(), "priced coin outflows");
        Ok(AnalyzerResult::Result(value_outflows(&flows.outflows, &prices)))
    }
}

fn value_outflows(outflows: &[CoinFlow], prices: &[CoinPrice]) -> CoinValueSummary {
    let mut summary = CoinValueSummary {
        coin_types: Vec::new(),
        coin_types_without_price: Vec::new(),
        total: 0.0,
    };

    for flow in outflows {
        let quote = prices.iter().find(|quote| quote.coin_type == flow.coin_type);
        let Some((decimals, price)) = quote.and_then(|q| q.price.map(|price| (q.decimals, price)))
        else {
            summary.coin_types_without_price.push(flow.coin_type.clone());
            continue;
        };
        let converted_amount = flow.amount as f64 / 10f64.powi(i32::from(decimals)) * price;
        summary.total += converted_amount;
        summary.coin_types.push(CoinValue {
            coin_type: flow.coin_type.clone(),
            decimals,
            price,
            amount: flow.amount,
            converted_amount,
        });
    }

    summary
}

singleton!(pub fn coin_values() -> CoinValues);
