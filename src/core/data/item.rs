use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a metadata item.
///
/// A `Property` is a single configuration value (`server.port`), a `Group`
/// is a named prefix that owns a set of properties (`server`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Property,
    Group,
}

/// Deprecation information attached to a property.
///
/// Both fields are optional: a property scanned from a file comment only
/// carries the flag, while producer-derived metadata may name a reason and
/// a replacement property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDeprecation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl ItemDeprecation {
    pub fn new(reason: Option<String>, replacement: Option<String>) -> Self {
        Self {
            reason,
            replacement,
        }
    }
}

impl fmt::Display for ItemDeprecation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reason, &self.replacement) {
            (None, None) => write!(f, "Deprecated"),
            (None, Some(replacement)) => write!(f, "Deprecated. Replacement: {}", replacement),
            (Some(reason), None) => write!(f, "Reason: {}", reason),
            (Some(reason), Some(replacement)) => {
                write!(f, "Reason: {}. Replacement: {}", reason, replacement)
            }
        }
    }
}

/// Identity of an item inside the collector's uniqueness set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub name: String,
    pub source_type: String,
    pub item_type: ItemType,
}

/// A single property or group record before tree assembly.
///
/// `name` is the full dotted path, `source_type` is the opaque identifier of
/// the declaring unit (a class name or a file name) and `type_name` is the
/// declared or inferred value type ("" if unknown). For groups, `name` is
/// the group prefix (may be empty) and `type_name` identifies the type the
/// group represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub item_type: ItemType,
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default)]
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<ItemDeprecation>,
}

impl ItemMetadata {
    pub fn new_property(
        name: impl Into<String>,
        type_name: impl Into<String>,
        source_type: impl Into<String>,
        default_value: Option<String>,
    ) -> Self {
        Self {
            item_type: ItemType::Property,
            name: name.into(),
            type_name: type_name.into(),
            source_type: source_type.into(),
            description: None,
            default_value,
            deprecation: None,
        }
    }

    pub fn new_group(
        name: impl Into<String>,
        type_name: impl Into<String>,
        source_type: impl Into<String>,
    ) -> Self {
        Self {
            item_type: ItemType::Group,
            name: name.into(),
            type_name: type_name.into(),
            source_type: source_type.into(),
            description: None,
            default_value: None,
            deprecation: None,
        }
    }

    pub fn is_property(&self) -> bool {
        self.item_type == ItemType::Property
    }

    pub fn is_group(&self) -> bool {
        self.item_type == ItemType::Group
    }

    /// Identity used for deduplication: (name, sourceType, kind).
    pub fn key(&self) -> ItemKey {
        ItemKey {
            name: self.name.clone(),
            source_type: self.source_type.clone(),
            item_type: self.item_type,
        }
    }
}

/// The persisted item-set document: the unit of storage and aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub items: Vec<ItemMetadata>,
}

impl MetadataDocument {
    pub fn new(items: Vec<ItemMetadata>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
