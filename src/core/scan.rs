//! Source scanning: walks configuration roots, filters candidate XML files
//! by a namespace marker, and extracts property metadata from placeholder
//! references found in element text and attribute values.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::data::ItemMetadata;
use crate::core::extract::extract_placeholders;
use crate::core::parsers::xml::{has_marker, parse_xml_file, XmlNode};
use crate::utils::has_text;

/// Type assigned to scanned properties; sources carry no type information.
pub const DEFAULT_PROPERTY_TYPE: &str = "String";

/// A file that looked like a candidate but could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub file_path: PathBuf,
    pub error: String,
}

/// Everything a scan run produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub items: Vec<ItemMetadata>,
    pub warnings: Vec<ScanWarning>,
    pub files_scanned: usize,
}

pub struct Scanner {
    markers: Vec<String>,
    marker_scan_lines: usize,
    deprecation_marker: String,
    ignores: Vec<glob::Pattern>,
    remaining_re: Regex,
    verbose: bool,
}

impl Scanner {
    pub fn from_config(config: &Config, verbose: bool) -> Result<Self> {
        let ignores = config
            .ignores
            .iter()
            .map(|pattern| glob::Pattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            markers: config.markers.clone(),
            marker_scan_lines: config.marker_scan_lines,
            deprecation_marker: config.deprecation_marker.clone(),
            ignores,
            remaining_re: Regex::new(r"^[\s:-]+(.*)$").unwrap(),
            verbose,
        })
    }

    /// Scans every root, in order. Absent roots contribute nothing.
    pub fn scan(&self, roots: &[PathBuf]) -> ScanOutcome {
        let mut candidates = Vec::new();
        for root in roots {
            if !root.exists() {
                continue;
            }
            self.collect_candidates(root, &mut candidates);
        }

        let results: Vec<std::result::Result<Vec<ItemMetadata>, ScanWarning>> = candidates
            .par_iter()
            .map(|path| self.scan_file(path))
            .collect();

        let mut outcome = ScanOutcome {
            files_scanned: candidates.len(),
            ..ScanOutcome::default()
        };
        for result in results {
            match result {
                Ok(items) => outcome.items.extend(items),
                Err(warning) => outcome.warnings.push(warning),
            }
        }
        // Traversal order is not a contract; sort for determinism.
        outcome
            .items
            .sort_by(|a, b| (&a.name, &a.source_type).cmp(&(&b.name, &b.source_type)));
        outcome
    }

    fn collect_candidates(&self, root: &Path, candidates: &mut Vec<PathBuf>) {
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("xml") {
                continue;
            }
            if self.is_ignored(path) {
                if self.verbose {
                    eprintln!("ignored: {}", path.display());
                }
                continue;
            }
            if !has_marker(path, &self.markers, self.marker_scan_lines) {
                continue;
            }
            candidates.push(path.to_path_buf());
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.ignores.iter().any(|pattern| pattern.matches(&text))
    }

    fn scan_file(&self, path: &Path) -> std::result::Result<Vec<ItemMetadata>, ScanWarning> {
        let root = parse_xml_file(path).map_err(|error| ScanWarning {
            file_path: path.to_path_buf(),
            error: format!("{error:#}"),
        })?;
        let source_type = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut items = Vec::new();
        // The nearest preceding comment is inherited down the subtree, so a
        // comment before a container element still describes the
        // placeholders inside it.
        let mut worklist: Vec<(&XmlNode, Option<&str>)> = vec![(&root, None)];
        while let Some((node, inherited)) = worklist.pop() {
            let comment = node.comment.as_deref().or(inherited);
            let mut placeholders = extract_placeholders(node.text.as_deref().unwrap_or(""));
            for (_, value) in &node.attributes {
                for (name, default) in extract_placeholders(value) {
                    placeholders.entry(name).or_insert(default);
                }
            }
            for (name, default) in placeholders {
                let default_value = (!default.is_empty()).then_some(default);
                let mut item = ItemMetadata::new_property(
                    name,
                    DEFAULT_PROPERTY_TYPE,
                    &source_type,
                    default_value,
                );
                self.enrich(&mut item, comment);
                items.push(item);
            }
            worklist.extend(node.children.iter().map(|child| (child, comment)));
        }
        Ok(items)
    }

    /// Fills description and deprecation from the comment preceding the
    /// element the property was found in. The comment is scanned for a line
    /// starting with the property name; the remainder of that line (after
    /// any `:`/`-`/whitespace separator) plus following non-blank lines
    /// form the description.
    fn enrich(&self, item: &mut ItemMetadata, comment: Option<&str>) {
        let Some(comment) = comment else {
            return;
        };
        let mut lines = comment.lines().map(str::trim);
        let Some(first) = lines.find(|line| line.starts_with(&item.name)) else {
            return;
        };
        let remainder = &first[item.name.len()..];
        let mut description = self
            .remaining_re
            .captures(remainder)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| remainder.trim().to_string());
        for line in &mut lines {
            if line.is_empty() {
                break;
            }
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(line);
        }
        if description.contains(&self.deprecation_marker) {
            item.deprecation = Some(Default::default());
        }
        if has_text(&description) {
            item.description = Some(description);
        }
    }
}
