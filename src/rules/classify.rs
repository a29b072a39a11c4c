//! Coarse classification of a transaction by the packages and command kinds
//! it uses.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::Serialize;

use sui_analyzer_types::encoding::parse_address;
use sui_analyzer_types::framework::is_framework_address;
use sui_analyzer_types::{TransactionData, TransactionInput};

use super::commands::{commands, Commands};
use super::core::{data, Data};
use crate::analyzer::{Analyzer, AnalyzerResult, AnalyzerSet, Resolved};
use crate::model::ResolvedCommand;
use crate::options::AnalysisContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationTag {
    FrameworkOnly,
    AppCall,
    Publish,
    Upgrade,
    Shared,
    Receiving,
    CrossPackage,
    SimpleCmdsOnly,
    TrivialFramework,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PtbClassification {
    pub tags: Vec<ClassificationTag>,
    /// Every called package is a framework package
    pub is_framework_only: bool,
    /// Framework-only, no publish or upgrade, no shared inputs
    pub is_trivial_framework: bool,
    pub non_system_packages: Vec<String>,
    pub system_packages: Vec<String>,
    pub has_publish: bool,
    pub has_upgrade: bool,
    pub has_shared_inputs: bool,
    pub has_receiving_inputs: bool,
    pub command_kinds: Vec<String>,
}

impl PtbClassification {
    pub fn has_tag(&self, tag: ClassificationTag) -> bool {
        self.tags.contains(&tag)
    }
}

pub struct Classification;

#[async_trait::async_trait]
impl Analyzer for Classification {
    type Output = PtbClassification;

    fn name(&self) -> &'static str {
        "classification"
    }

    fn dependencies(&self) -> AnalyzerSet {
        AnalyzerSet::new()
            .with("data", data())
            .with("commands", commands())
    }

    async fn analyze(
        &self,
        _ctx: &AnalysisContext,
        deps: &Resolved,
    ) -> Result<AnalyzerResult<PtbClassification>> {
        let tx = deps.get::<Data>("data")?;
        let commands = deps.get::<Commands>("commands")?;
        Ok(AnalyzerResult::Result(classify(&tx, &commands)?))
    }
}

pub(crate) fn classify(tx: &TransactionData, commands: &[ResolvedCommand]) -> Result<PtbClassification> {
    let mut system_packages = BTreeSet::new();
    let mut non_system_packages = BTreeSet::new();
    let mut command_kinds = BTreeSet::new();

    for command in commands {
        command_kinds.insert(command.kind());
        if let ResolvedCommand::MoveCall { package, .. } = command {
            if is_framework_address(&parse_address(package, "package")?) {
                system_packages.insert(package.clone());
            } else {
                non_system_packages.insert(package.clone());
            }
        }
    }

    let has_publish = command_kinds.contains("Publish");
    let has_upgrade = command_kinds.contains("Upgrade");
    let has_shared_inputs = tx
        .inputs
        .iter()
        .any(|input| matches!(input, TransactionInput::SharedObject { .. }));
    let has_receiving_inputs = tx
        .inputs
        .iter()
        .any(|input| matches!(input, TransactionInput::Receiving { .. }));

    let is_framework_only = non_system_packages.is_empty();
    let simple_cmds_only = !has_publish && !has_upgrade;
    let is_trivial_framework = is_framework_only && simple_cmds_only && !has_shared_inputs;

    let flags = [
        (is_framework_only, ClassificationTag::FrameworkOnly),
        (!is_framework_only, ClassificationTag::AppCall),
        (has_publish, ClassificationTag::Publish),
        (has_upgrade, ClassificationTag::Upgrade),
        (has_shared_inputs, ClassificationTag::Shared),
        (has_receiving_inputs, ClassificationTag::Receiving),
        (non_system_packages.len() > 1, ClassificationTag::CrossPackage),
        (simple_cmds_only, ClassificationTag::SimpleCmdsOnly),
        (is_trivial_framework, ClassificationTag::TrivialFramework),
    ];
    let tags = flags
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .collect();

    Ok(PtbClassification {
        tags,
        is_framework_only,
        is_trivial_framework,
        non_system_packages: non_system_packages.into_iter().collect(),
        system_packages: system_packages.into_iter().collect(),
        has_publish,
        has_upgrade,
        has_shared_inputs,
        has_receiving_inputs,
        command_kinds: command_kinds.into_iter().map(str::to_string).collect(),
    })
}

singleton!(pub fn classification() -> Classification);
