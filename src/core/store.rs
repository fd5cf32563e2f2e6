//! Tolerant persistence of the item-set document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::data::MetadataDocument;

pub const METADATA_FILE_NAME: &str = "configuration-metadata.json";

/// Reads and writes the metadata document under a directory. Reading is
/// tolerant: an absent or corrupt file yields `None` so a run can always
/// proceed from scratch. Writing is strict.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    path: PathBuf,
}

impl MetadataStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(METADATA_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Option<MetadataDocument> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Writes the document, creating parent directories as needed. An empty
    /// document is not written; returns whether a file was produced.
    pub fn write(&self, document: &MetadataDocument) -> Result<bool> {
        if document.is_empty() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(true)
    }
}
