use std::path::PathBuf;

use anyhow::{Ok, Result};

use super::super::args::GenerateCommand;
use super::{CommandResult, CommandSummary, Diagnostic, GenerateSummary};
use crate::config::load_config;
use crate::core::collect::{MergePolicy, MetadataCollector};
use crate::core::scan::Scanner;
use crate::core::store::MetadataStore;

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let project_dir = &args.common.project_dir;
    let config = load_config(project_dir)?.config;

    let roots: Vec<PathBuf> = if cmd.roots.is_empty() {
        config.roots.iter().map(|r| project_dir.join(r)).collect()
    } else {
        cmd.roots.clone()
    };

    let scanner = Scanner::from_config(&config, args.common.verbose)?;
    let outcome = scanner.scan(&roots);

    let mut collector = MetadataCollector::new();
    collector.add_all(outcome.items);

    let metadata_dir = args
        .metadata_dir
        .clone()
        .unwrap_or_else(|| project_dir.join(&config.metadata_dir));
    let store = MetadataStore::new(&metadata_dir);

    let policy = MergePolicy {
        regenerated_suffixes: config.regenerated_suffixes.clone(),
    };
    let merged_count = match store.read() {
        Some(previous) => collector.merge(&previous, &policy),
        None => 0,
    };
    // Merged items take part in group derivation too.
    collector.derive_groups(args.groups);

    let property_count = collector.items().iter().filter(|i| i.is_property()).count();
    let group_count = collector.items().iter().filter(|i| i.is_group()).count();

    let document = collector.into_document();
    let written = store.write(&document)?;

    let mut result = CommandResult::new(CommandSummary::Generate(GenerateSummary {
        files_scanned: outcome.files_scanned,
        property_count,
        group_count,
        merged_count,
        output: written.then(|| store.path().to_path_buf()),
    }));
    result.warnings = outcome
        .warnings
        .into_iter()
        .map(|w| Diagnostic {
            origin: w.file_path,
            message: w.error,
        })
        .collect();
    Ok(result)
}
