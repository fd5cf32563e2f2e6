use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Ok, Result};
use serde::Deserialize;

use super::super::args::AggregateCommand;
use super::{AggregateSummary, CommandResult, CommandSummary, Diagnostic};
use crate::core::aggregate::filter::GroupFilters;
use crate::core::aggregate::{AggregationCommand, AggregationEngine, CombinedInput};
use crate::core::data::DocumentKind;
use crate::utils::section_name_for;

/// Shape of the `--config` JSON file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationConfig {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    kind: Option<DocumentKind>,
    #[serde(default)]
    output: Option<PathBuf>,
    #[serde(default)]
    inputs: Vec<InputSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputSpec {
    path: PathBuf,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(flatten)]
    filters: GroupFilters,
}

pub fn aggregate(cmd: AggregateCommand) -> Result<CommandResult> {
    let args = &cmd.args;

    let file_config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Some(
                serde_json::from_str::<AggregationConfig>(&content)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?,
            )
        }
        None => None,
    };

    let mut inputs: Vec<CombinedInput> = Vec::new();
    if let Some(config) = &file_config {
        for spec in &config.inputs {
            inputs.push(CombinedInput {
                path: spec.path.clone(),
                section_name: spec
                    .name
                    .clone()
                    .unwrap_or_else(|| section_name_for(&spec.path)),
                description: spec.description.clone(),
                filters: spec.filters.clone(),
            });
        }
    }
    for path in &cmd.inputs {
        inputs.push(CombinedInput {
            path: path.clone(),
            section_name: section_name_for(path),
            description: None,
            filters: GroupFilters::default(),
        });
    }
    anyhow::ensure!(
        !inputs.is_empty(),
        "No inputs given. Pass module paths or a --config file."
    );

    let file_config = file_config.as_ref();
    let name = args
        .name
        .clone()
        .or_else(|| file_config.and_then(|c| c.name.clone()))
        .unwrap_or_else(|| "Configuration properties".to_string());
    let description = args
        .description
        .clone()
        .or_else(|| file_config.and_then(|c| c.description.clone()));
    let kind = args
        .kind
        .or_else(|| file_config.and_then(|c| c.kind))
        .unwrap_or(DocumentKind::Markdown);
    let output = args
        .output
        .clone()
        .or_else(|| file_config.and_then(|c| c.output.clone()))
        .unwrap_or_else(|| PathBuf::from("project-properties.json"));

    let command = AggregationCommand {
        name,
        description,
        inputs,
        kind,
        // The render target drops the model file's own extension.
        output_file: output.with_extension(""),
        fail_on_missing_input: !args.allow_missing_input,
    };

    let engine = AggregationEngine::new();
    let (document, warnings) = engine.aggregate(&command)?;

    let dedupe = !args.keep_duplicates;
    let property_count = document.aggregated_properties(dedupe).len();
    let json = serde_json::to_string_pretty(&document.to_renderer_json(dedupe))?;
    write_output(&output, &json)?;

    let mut result = CommandResult::new(CommandSummary::Aggregate(AggregateSummary {
        section_count: document.sections.len(),
        property_count,
        output,
        render_target: document.render_target.clone(),
    }));
    result.warnings = warnings
        .into_iter()
        .map(|w| Diagnostic {
            origin: w.input,
            message: w.message,
        })
        .collect();
    Ok(result)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
