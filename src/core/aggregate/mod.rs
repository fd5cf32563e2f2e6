//! Aggregation: loads stored item-set documents from several inputs and
//! combines their group forests into a single renderable document.

pub mod filter;
pub mod reader;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use rayon::prelude::*;

use crate::core::data::{CombinedDocument, DocumentKind, DocumentSection, MetadataDocument};
use crate::core::store::METADATA_FILE_NAME;
use filter::{apply_filters, GroupFilters};
use reader::read_groups;

/// One input to combine: where its document lives and how its section
/// should appear in the output.
#[derive(Debug, Clone)]
pub struct CombinedInput {
    pub path: PathBuf,
    pub section_name: String,
    pub description: Option<String>,
    pub filters: GroupFilters,
}

/// A full aggregation request.
#[derive(Debug, Clone)]
pub struct AggregationCommand {
    pub name: String,
    pub description: Option<String>,
    pub inputs: Vec<CombinedInput>,
    pub kind: DocumentKind,
    pub output_file: PathBuf,
    pub fail_on_missing_input: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationWarning {
    pub input: PathBuf,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Builds the combined document. Missing inputs are errors under the
    /// strict policy and empty sections otherwise; corrupt inputs are
    /// always tolerated as empty sections with a warning.
    pub fn aggregate(
        &self,
        command: &AggregationCommand,
    ) -> Result<(CombinedDocument, Vec<AggregationWarning>)> {
        let loaded: Vec<Result<(MetadataDocument, Option<AggregationWarning>)>> = command
            .inputs
            .par_iter()
            .map(|input| self.load_input(input, command.fail_on_missing_input))
            .collect();

        let mut warnings = Vec::new();
        let mut sections = Vec::new();
        for (input, loaded) in command.inputs.iter().zip(loaded) {
            let (document, load_warning) = loaded?;
            warnings.extend(load_warning);

            let (groups, group_warnings) = read_groups(&document);
            warnings.extend(group_warnings.into_iter().map(|message| {
                AggregationWarning {
                    input: input.path.clone(),
                    message,
                }
            }));

            let mut groups = apply_filters(groups, &input.filters);
            groups.retain(|group| !(group.is_unknown && group.is_empty()));

            sections.push(DocumentSection {
                name: input.section_name.clone(),
                description: input.description.clone(),
                groups,
            });
        }
        sections.sort_by_key(|section| section.name.to_lowercase());

        let document = CombinedDocument {
            name: command.name.clone(),
            description: command.description.clone(),
            kind: command.kind,
            render_target: command.kind.fix_file_extension(&command.output_file),
            sections,
        };
        Ok((document, warnings))
    }

    fn load_input(
        &self,
        input: &CombinedInput,
        fail_on_missing: bool,
    ) -> Result<(MetadataDocument, Option<AggregationWarning>)> {
        let path = resolve_input_path(&input.path);
        if !path.exists() {
            if fail_on_missing {
                bail!("input not found: {}", path.display());
            }
            return Ok((
                MetadataDocument::default(),
                Some(AggregationWarning {
                    input: input.path.clone(),
                    message: format!("input not found: {}", path.display()),
                }),
            ));
        }
        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(document) => Ok((document, None)),
            Err(error) => Ok((
                MetadataDocument::default(),
                Some(AggregationWarning {
                    input: input.path.clone(),
                    message: format!("ignoring corrupt input {}: {error}", path.display()),
                }),
            )),
        }
    }
}

/// A directory input refers to the metadata file inside it.
fn resolve_input_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(METADATA_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}
