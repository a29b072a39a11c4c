//! Command resolution: raw PTB commands joined with resolved inputs and
//! Move signatures, each argument tagged with the access it requires.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};

use sui_analyzer_types::encoding::normalize_address;
use sui_analyzer_types::{MoveFunction, PtbArgument, PtbCommand, TransactionData};

use super::core::{data, Data};
use super::functions::{move_functions, FunctionKey, MoveFunctions};
use super::inputs::{inputs, Inputs};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Issue, Resolved};
use crate::model::{AccessLevel, ArgumentKind, ResolvedCommand, ResolvedCommandArgument, ResolvedInput};
use crate::options::AnalysisContext;

pub struct Commands;

#[async_trait::async_trait]
impl Analyzer for Commands {
    type Output = Vec<ResolvedCommand>;

    fn name(&self) -> &'static str {
        "commands"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new()
            .with("data", data())
            .with("inputs", inputs())
            .with("move_functions", move_functions())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<Vec<ResolvedCommand>>> {
        let tx = deps.get::<Data>("data")?;
        let inputs = deps.get::<Inputs>("inputs")?;
        let functions = deps.get::<MoveFunctions>("move_functions")?;
        resolve_commands(&tx, &inputs, &functions)
    }
}

/// Resolve every command of `tx`.
///
/// Data problems are collected as issues. An unknown command kind is an error.
pub(crate) fn resolve_commands(
    tx: &TransactionData,
    inputs: &[ResolvedInput],
    functions: &HashMap<FunctionKey, Arc<MoveFunction>>,
) -> Result<AnalyzerResult<Vec<ResolvedCommand>>> {
    let mut resolver = ArgumentResolver {
        inputs,
        issues: Vec::new(),
    };
    let mut commands = Vec::with_capacity(tx.commands.len());

    for (position, command) in tx.commands.iter().enumerate() {
        let Ok(index) = u16::try_from(position) else {
            bail!("Command index {} does not fit a PTB result", position);
        };
        let resolved = match command {
            PtbCommand::MoveCall {
                package,
                module,
                function,
                type_arguments,
                arguments,
            } => {
                let key = (normalize_address(package), module.clone(), function.clone());
                let Some(signature) = functions.get(&key) else {
                    resolver.issue(format!(
                        "Missing signature for Move function {}::{}::{}",
                        package, module, function
                    ));
                    continue;
                };
                if arguments.len() > signature.parameters.len() {
                    resolver.issue(format!(
                        "Move function {}::{}::{} takes {} arguments, command {} passes {}",
                        package,
                        module,
                        function,
                        signature.parameters.len(),
                        index,
                        arguments.len()
                    ));
                }
                let arguments = arguments
                    .iter()
                    .zip(&signature.parameters)
                    .map(|(argument, parameter)| {
                        resolver.resolve(argument, AccessLevel::for_parameter(parameter.reference))
                    })
                    .collect();
                ResolvedCommand::MoveCall {
                    index,
                    package: key.0,
                    module: module.clone(),
                    function: function.clone(),
                    type_arguments: type_arguments.clone(),
                    arguments,
                    signature: signature.clone(),
                }
            }
            PtbCommand::TransferObjects { objects, address } => ResolvedCommand::TransferObjects {
                index,
                objects: resolver.resolve_all(objects, AccessLevel::Transfer),
                address: resolver.resolve(address, AccessLevel::Transfer),
            },
            PtbCommand::SplitCoins { coin, amounts } => ResolvedCommand::SplitCoins {
                index,
                coin: resolver.resolve(coin, AccessLevel::Mutate),
                amounts: resolver.resolve_all(amounts, AccessLevel::Transfer),
            },
            PtbCommand::MergeCoins {
                destination,
                sources,
            } => ResolvedCommand::MergeCoins {
                index,
                destination: resolver.resolve(destination, AccessLevel::Mutate),
                sources: resolver.resolve_all(sources, AccessLevel::Transfer),
            },
            PtbCommand::MakeMoveVec { type_arg, elements } => ResolvedCommand::MakeMoveVec {
                index,
                type_arg: type_arg.clone(),
                elements: resolver.resolve_all(elements, AccessLevel::Transfer),
            },
            PtbCommand::Publish { dependencies, .. } => ResolvedCommand::Publish {
                index,
                dependencies: dependencies.clone(),
            },
            PtbCommand::Upgrade {
                package, ticket, ..
            } => ResolvedCommand::Upgrade {
                index,
                package: normalize_address(package),
                ticket: resolver.resolve(ticket, AccessLevel::Transfer),
            },
            PtbCommand::Intent { name } => {
                resolver.issue(format!("Unexpected $Intent command: {}", name));
                continue;
            }
            PtbCommand::Unknown => bail!("Unknown command type at index {}", index),
        };
        commands.push(resolved);
    }

    Ok(AnalyzerResult::from_parts(commands, resolver.issues))
}

struct ArgumentResolver<'a> {
    inputs: &'a [ResolvedInput],
    issues: Vec<Issue>,
}

impl ArgumentResolver<'_> {
    fn issue(&mut self, message: String) {
        self.issues.push(Issue::new(message));
    }

    fn resolve(&mut self, argument: &PtbArgument, access: AccessLevel) -> ResolvedCommandArgument {
        let kind = match *argument {
            PtbArgument::GasCoin => ArgumentKind::GasCoin,
            PtbArgument::Input { index } => match self.inputs.get(index as usize) {
                Some(input) => ArgumentKind::Input(input.clone()),
                None => {
                    self.issue(format!("Missing input for index {}", index));
                    ArgumentKind::Unknown
                }
            },
            PtbArgument::Result { index } => ArgumentKind::Result {
                command: index,
                slot: 0,
            },
            PtbArgument::NestedResult {
                index,
                result_index,
            } => ArgumentKind::Result {
                command: index,
                slot: result_index,
            },
            PtbArgument::Unknown => {
                self.issue("Unexpected argument type".to_string());
                ArgumentKind::Unknown
            }
        };
        ResolvedCommandArgument::new(kind, access)
    }

    fn resolve_all(
        &mut self,
        arguments: &[PtbArgument],
        access: AccessLevel,
    ) -> Vec<ResolvedCommandArgument> {
        arguments
            .iter()
            .map(|argument| self.resolve(argument, access))
            .collect()
    }
}

singleton!(pub fn commands() -> Commands);
