//! Per-input include/exclude filtering of the assembled group forest.

use serde::{Deserialize, Serialize};

use crate::core::data::PropertyGroup;

/// Exact-name filters applied to one input's groups before it becomes a
/// section. Includes, when present, act as allowlists; excludes always
/// remove. Group filters match the group name, property filters the full
/// property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupFilters {
    #[serde(default)]
    pub included_groups: Vec<String>,
    #[serde(default)]
    pub excluded_groups: Vec<String>,
    #[serde(default)]
    pub included_properties: Vec<String>,
    #[serde(default)]
    pub excluded_properties: Vec<String>,
}

impl GroupFilters {
    pub fn is_empty(&self) -> bool {
        self.included_groups.is_empty()
            && self.excluded_groups.is_empty()
            && self.included_properties.is_empty()
            && self.excluded_properties.is_empty()
    }

    fn keeps_group(&self, group: &PropertyGroup) -> bool {
        if self.excluded_groups.contains(&group.group_name) {
            return false;
        }
        self.included_groups.is_empty() || self.included_groups.contains(&group.group_name)
    }

    fn keeps_property(&self, fq_name: &str) -> bool {
        if self.excluded_properties.iter().any(|p| p == fq_name) {
            return false;
        }
        self.included_properties.is_empty()
            || self.included_properties.iter().any(|p| p == fq_name)
    }
}

/// Applies `filters` to the forest. Group filters only apply at the top
/// level; a kept group keeps its nested groups, subject to property
/// filtering throughout.
pub fn apply_filters(groups: Vec<PropertyGroup>, filters: &GroupFilters) -> Vec<PropertyGroup> {
    if filters.is_empty() {
        return groups;
    }
    groups
        .into_iter()
        .filter(|group| group.is_unknown || filters.keeps_group(group))
        .map(|group| filter_properties(group, filters))
        .collect()
}

fn filter_properties(mut group: PropertyGroup, filters: &GroupFilters) -> PropertyGroup {
    group
        .properties
        .retain(|property| filters.keeps_property(&property.fq_name));
    group.child_groups = group
        .child_groups
        .into_iter()
        .map(|child| filter_properties(child, filters))
        .collect();
    group
}
