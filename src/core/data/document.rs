use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::data::group::{Property, PropertyGroup};

/// Output flavor of a combined document. Only affects the render target's
/// file extension; the combined model itself is format-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Markdown,
    #[value(alias = "adoc")]
    AsciiDoc,
    Html,
    Xml,
}

const EXTENSIONS: &[(DocumentKind, &str)] = &[
    (DocumentKind::Markdown, "md"),
    (DocumentKind::AsciiDoc, "adoc"),
    (DocumentKind::Html, "html"),
    (DocumentKind::Xml, "xml"),
];

impl DocumentKind {
    pub fn extension(&self) -> &'static str {
        EXTENSIONS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, ext)| *ext)
            .unwrap_or("md")
    }

    /// Appends this kind's extension when the path has none or a different
    /// one. An existing matching extension is left untouched.
    pub fn fix_file_extension(&self, path: &Path) -> PathBuf {
        let expected = self.extension();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(expected) => path.to_path_buf(),
            _ => {
                let mut name = path.as_os_str().to_os_string();
                name.push(".");
                name.push(expected);
                PathBuf::from(name)
            }
        }
    }
}

/// One section of the combined document: the group forest read from a
/// single input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub groups: Vec<PropertyGroup>,
}

impl DocumentSection {
    /// All properties in this section, including nested groups, sorted by
    /// full name. Duplicates across groups are kept.
    pub fn listed_properties(&self) -> Vec<&Property> {
        fn collect<'a>(group: &'a PropertyGroup, out: &mut Vec<&'a Property>) {
            out.extend(group.properties.iter());
            for child in &group.child_groups {
                collect(child, out);
            }
        }
        let mut properties = Vec::new();
        for group in &self.groups {
            collect(group, &mut properties);
        }
        properties.sort_by(|a, b| a.fq_name.cmp(&b.fq_name));
        properties
    }
}

/// The fully aggregated model handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: DocumentKind,
    pub render_target: PathBuf,
    #[serde(default)]
    pub sections: Vec<DocumentSection>,
}

impl CombinedDocument {
    /// All properties across every section, sorted by full name. With
    /// `dedupe` a property name appears once; without it each module's
    /// occurrence is listed.
    pub fn aggregated_properties(&self, dedupe: bool) -> Vec<&Property> {
        let mut properties: Vec<&Property> = self
            .sections
            .iter()
            .flat_map(|section| section.listed_properties())
            .collect();
        properties.sort_by(|a, b| a.fq_name.cmp(&b.fq_name));
        if dedupe {
            properties.dedup_by(|a, b| a.fq_name == b.fq_name);
        }
        properties
    }

    /// The renderer handoff payload: the document plus the flattened
    /// property listing computed under the given duplicate policy.
    pub fn to_renderer_json(&self, dedupe: bool) -> serde_json::Value {
        json!({
            "name": self.name,
            "description": self.description,
            "kind": self.kind,
            "renderTarget": self.render_target,
            "aggregatedProperties": self.aggregated_properties(dedupe),
            "sections": self.sections.iter().map(|section| {
                json!({
                    "name": section.name,
                    "description": section.description,
                    "properties": section.listed_properties(),
                    "groups": section.groups,
                })
            }).collect::<Vec<_>>(),
        })
    }
}
