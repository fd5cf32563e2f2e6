//! Turns a flat item-set document into a forest of property groups:
//! properties attach to the group representing their declaring type, groups
//! nest under the group whose type declared them, and everything left over
//! lands in the unknown bucket.

use std::collections::{HashMap, HashSet};

use crate::core::data::{ItemMetadata, ItemType, MetadataDocument, Property, PropertyGroup};

/// Reads the group forest out of a document. Warnings report structural
/// oddities (a nested group whose parent type is missing, a parent cycle)
/// that were repaired by keeping the group top-level.
pub fn read_groups(document: &MetadataDocument) -> (Vec<PropertyGroup>, Vec<String>) {
    let mut warnings = Vec::new();

    let mut properties_by_source: HashMap<&str, Vec<&ItemMetadata>> = HashMap::new();
    for item in &document.items {
        if item.item_type == ItemType::Property {
            properties_by_source
                .entry(item.source_type.as_str())
                .or_default()
                .push(item);
        }
    }

    let mut groups: Vec<PropertyGroup> = document
        .items
        .iter()
        .filter(|item| item.is_group())
        .map(|item| PropertyGroup::new(&item.name, &item.type_name, &item.source_type))
        .collect();

    let known_types: HashSet<String> = groups.iter().map(|g| g.type_name.clone()).collect();

    // Attach each property to every group representing its declaring type
    // and owning its name prefix.
    for group in &mut groups {
        if let Some(items) = properties_by_source.get(group.type_name.as_str()) {
            for item in items {
                if !owns(&group.group_name, &item.name) {
                    continue;
                }
                let mut property = Property::from_item(item);
                property.key = scoped_key(&group.group_name, &item.name);
                group.properties.push(property);
            }
        }
    }

    let mut unknown = PropertyGroup::unknown();
    for item in &document.items {
        if item.item_type == ItemType::Property
            && !known_types.contains(item.source_type.as_str())
        {
            unknown.properties.push(Property::from_item(item));
        }
    }

    // Resolve nesting: a group whose source type is represented by another
    // group nests under it.
    let parent_of = resolve_parents(&groups, &mut warnings);
    for (i, parent) in parent_of.iter().enumerate() {
        if let Some(j) = parent {
            let parent_type = groups[*j].type_name.clone();
            groups[i].parent_type = Some(parent_type);
        }
    }

    let forest = assemble_forest(groups, &parent_of);

    let mut result = forest;
    result.push(unknown);
    result.sort_by_key(|g| g.source_type.to_lowercase());
    for group in &mut result {
        group.sort_recursively();
    }
    (result, warnings)
}

/// A group owns a property when the property's full name extends the group
/// name at a dot boundary. A blank group name owns everything.
fn owns(group_name: &str, fq_name: &str) -> bool {
    if group_name.is_empty() {
        return true;
    }
    match fq_name.strip_prefix(group_name) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// The property key scoped to its owning group: the full name with the
/// group prefix and its trailing dot removed. Blank-named owners keep the
/// full name.
fn scoped_key(group_name: &str, fq_name: &str) -> String {
    if group_name.is_empty() {
        return fq_name.to_string();
    }
    fq_name
        .strip_prefix(group_name)
        .map(|rest| rest.strip_prefix('.').unwrap_or(rest).to_string())
        .unwrap_or_else(|| fq_name.to_string())
}

/// For each group, the index of the group it nests under: the first other
/// group whose type matches this group's source type. Cycles are cut at the
/// group closing them.
fn resolve_parents(groups: &[PropertyGroup], warnings: &mut Vec<String>) -> Vec<Option<usize>> {
    let mut parent_of: Vec<Option<usize>> = vec![None; groups.len()];
    for (i, group) in groups.iter().enumerate() {
        if !group.is_nested() {
            continue;
        }
        let parent = groups
            .iter()
            .enumerate()
            .find(|(j, candidate)| *j != i && candidate.type_name == group.source_type)
            .map(|(j, _)| j);
        match parent {
            Some(j) => parent_of[i] = Some(j),
            None => warnings.push(format!(
                "group '{}' declares source type '{}' but no group represents it; keeping it top-level",
                group.group_name, group.source_type
            )),
        }
    }

    for i in 0..groups.len() {
        let mut visited = HashSet::from([i]);
        let mut current = i;
        while let Some(next) = parent_of[current] {
            if !visited.insert(next) {
                warnings.push(format!(
                    "group '{}' participates in a nesting cycle; keeping it top-level",
                    groups[current].group_name
                ));
                parent_of[current] = None;
                break;
            }
            current = next;
        }
    }
    parent_of
}

/// Moves each group under its parent, leaving parentless groups as roots.
fn assemble_forest(groups: Vec<PropertyGroup>, parent_of: &[Option<usize>]) -> Vec<PropertyGroup> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); groups.len()];
    let mut roots = Vec::new();
    for (i, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(j) => children[*j].push(i),
            None => roots.push(i),
        }
    }

    let mut slots: Vec<Option<PropertyGroup>> = groups.into_iter().map(Some).collect();

    fn assemble(
        slots: &mut [Option<PropertyGroup>],
        children: &[Vec<usize>],
        idx: usize,
    ) -> Option<PropertyGroup> {
        let mut group = slots[idx].take()?;
        for &child in &children[idx] {
            if let Some(assembled) = assemble(slots, children, child) {
                group.child_groups.push(assembled);
            }
        }
        Some(group)
    }

    roots
        .into_iter()
        .filter_map(|idx| assemble(&mut slots, &children, idx))
        .collect()
}
