use serde::{Deserialize, Serialize};

use crate::core::data::item::{ItemDeprecation, ItemMetadata};

/// Source type assigned to properties whose declaring unit could not be
/// matched to any group.
pub const UNKNOWN_SOURCE_TYPE: &str = "unknown";

/// Display name for the catch-all group holding unmatched properties.
pub const UNKNOWN_GROUP_NAME: &str = "Unknown group";

/// A property as it appears inside an assembled group tree.
///
/// `fq_name` is the full dotted path; `key` is the path scoped to the owning
/// group (the full path again when the owner is the unknown group or a
/// blank-named group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub fq_name: String,
    pub key: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<ItemDeprecation>,
}

impl Property {
    pub fn from_item(item: &ItemMetadata) -> Self {
        Self {
            fq_name: item.name.clone(),
            key: item.name.clone(),
            type_name: item.type_name.clone(),
            description: item.description.clone(),
            default_value: item.default_value.clone(),
            deprecation: item.deprecation.clone(),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// A group of properties in the assembled tree, possibly with nested child
/// groups contributed by other source types within the same input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroup {
    pub group_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub source_type: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub child_groups: Vec<PropertyGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_unknown: bool,
}

impl PropertyGroup {
    pub fn new(
        group_name: impl Into<String>,
        type_name: impl Into<String>,
        source_type: impl Into<String>,
    ) -> Self {
        Self {
            group_name: group_name.into(),
            type_name: type_name.into(),
            source_type: source_type.into(),
            properties: Vec::new(),
            child_groups: Vec::new(),
            parent_type: None,
            is_unknown: false,
        }
    }

    pub fn unknown() -> Self {
        Self {
            group_name: UNKNOWN_GROUP_NAME.to_string(),
            type_name: UNKNOWN_SOURCE_TYPE.to_string(),
            source_type: UNKNOWN_SOURCE_TYPE.to_string(),
            properties: Vec::new(),
            child_groups: Vec::new(),
            parent_type: None,
            is_unknown: true,
        }
    }

    /// A nested group represents a type other than the one it was declared
    /// in. The unknown bucket is never nested.
    pub fn is_nested(&self) -> bool {
        !self.is_unknown && self.type_name != self.source_type
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.child_groups.is_empty()
    }

    /// Sorts properties by full name and child groups by source type,
    /// case-insensitively, recursing into children.
    pub fn sort_recursively(&mut self) {
        self.properties.sort_by(|a, b| a.fq_name.cmp(&b.fq_name));
        self.child_groups
            .sort_by_key(|g| g.source_type.to_lowercase());
        for child in &mut self.child_groups {
            child.sort_recursively();
        }
    }
}
