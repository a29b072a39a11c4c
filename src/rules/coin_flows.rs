use anyhow::Result;

use super::coins::{coins, gas_coins, Coins, GasCoins};
use super::commands::{commands, Commands};
use super::core::{data, Data};
use super::inputs::{inputs, Inputs};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Resolved};
use crate::options::AnalysisContext;
use crate::simulation::{simulate, SimulationInput};

pub use crate::simulation::{CoinFlow, CoinFlowSummary};

/// Net outflow of every coin type the sender touches.
pub struct CoinFlows;

#[async_trait::async_trait]
impl Analyzer for CoinFlows {
    type Output = CoinFlowSummary;

    fn name(&self) -> &'static str {
        "coin_flows"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new()
            .with("data", data())
            .with("inputs", inputs())
            .with("commands", commands())
            .with("coins", coins())
            .with("gas_coins", gas_coins())
    }

    async fn analyze(
        &self,
        ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<CoinFlowSummary>> {
        let tx = deps.get::<Data>("data")?;
        let inputs = deps.get::<Inputs>("inputs")?;
        let commands = deps.get::<Commands>("commands")?;
        let coins = deps.get::<Coins>("coins")?;
        let gas_coins = deps.get::<GasCoins>("gas_coins")?;

        simulate(SimulationInput {
            transaction: &tx,
            inputs: &inputs,
            commands: &commands,
            coins: &coins,
            gas_coins: &gas_coins,
            native_coin_type: &ctx.config().native_coin_type,
        })
    }
}

singleton!(pub fn coin_flows() -> CoinFlows);
