//! Metadata collection: order-preserving dedup, merge of previously stored
//! items, and group derivation for source types that declare no group.

use std::collections::{BTreeMap, HashSet};

use clap::ValueEnum;

use crate::core::data::{ItemKey, ItemMetadata, ItemType, MetadataDocument};

/// Decides whether a previously stored item should be carried forward into
/// the current run. Items whose source type matches a regenerated suffix
/// are rebuilt from source every time and never merged.
#[derive(Debug, Clone)]
pub struct MergePolicy {
    pub regenerated_suffixes: Vec<String>,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            regenerated_suffixes: vec![".xml".to_string()],
        }
    }
}

impl MergePolicy {
    pub fn should_merge(&self, item: &ItemMetadata) -> bool {
        !self
            .regenerated_suffixes
            .iter()
            .any(|suffix| item.source_type.ends_with(suffix.as_str()))
    }
}

/// How to fabricate groups for source types without a declared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupStrategy {
    /// Collapse property names to their longest common dotted prefix.
    #[default]
    Prefix,
    /// One blank-named group per source type.
    Blank,
    /// One group named after the source type itself.
    Untyped,
}

#[derive(Debug, Default)]
pub struct MetadataCollector {
    items: Vec<ItemMetadata>,
    seen: HashSet<ItemKey>,
}

impl MetadataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item unless an equal-keyed one is already present. Returns
    /// whether the item was accepted.
    pub fn add(&mut self, item: ItemMetadata) -> bool {
        if self.seen.insert(item.key()) {
            self.items.push(item);
            true
        } else {
            false
        }
    }

    pub fn add_all(&mut self, items: impl IntoIterator<Item = ItemMetadata>) {
        for item in items {
            self.add(item);
        }
    }

    /// Carries forward items from a previous run that the policy allows and
    /// that this run has not re-collected. Returns how many were merged.
    pub fn merge(&mut self, previous: &MetadataDocument, policy: &MergePolicy) -> usize {
        let mut merged = 0;
        for item in &previous.items {
            if policy.should_merge(item) && self.add(item.clone()) {
                merged += 1;
            }
        }
        merged
    }

    pub fn has_group_for(&self, source_type: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.is_group() && item.source_type == source_type)
    }

    /// Fabricates group items for every source type that declared none.
    pub fn derive_groups(&mut self, strategy: GroupStrategy) {
        let mut by_source: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for item in &self.items {
            if item.item_type == ItemType::Property {
                by_source
                    .entry(item.source_type.clone())
                    .or_default()
                    .push(item.name.clone());
            }
        }

        let mut derived = Vec::new();
        for (source_type, names) in by_source {
            if source_type.is_empty() || self.has_group_for(&source_type) {
                continue;
            }
            match strategy {
                GroupStrategy::Prefix => {
                    for prefix in prefix_groups(&names) {
                        derived.push(ItemMetadata::new_group(prefix, &source_type, &source_type));
                    }
                }
                GroupStrategy::Blank => {
                    derived.push(ItemMetadata::new_group("", &source_type, &source_type));
                }
                GroupStrategy::Untyped => {
                    derived.push(ItemMetadata::new_group(&source_type, &source_type, "."));
                }
            }
        }
        self.add_all(derived);
    }

    pub fn into_document(self) -> MetadataDocument {
        MetadataDocument::new(self.items)
    }

    pub fn items(&self) -> &[ItemMetadata] {
        &self.items
    }
}

/// Buckets property names by their first dot segment and collapses each
/// bucket to the longest common prefix ending at a dot boundary. Names
/// without a dot collapse into a single empty-named bucket.
fn prefix_groups(names: &[String]) -> Vec<String> {
    let mut buckets: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for name in names {
        let head = match name.find('.') {
            Some(dot) => &name[..dot],
            None => "",
        };
        buckets.entry(head).or_default().push(name);
    }

    let mut prefixes: Vec<String> = buckets
        .into_values()
        .map(|bucket| collapse_prefix(&bucket))
        .collect();
    prefixes.sort();
    prefixes.dedup();
    prefixes
}

/// Longest common prefix of a set of dotted names, truncated at the last
/// dot both sides agree on. Each name is compared with a trailing dot
/// appended so an exact name counts as its own full prefix.
fn collapse_prefix(names: &[&str]) -> String {
    let mut prefix = format!("{}.", names[0]);
    for name in &names[1..] {
        let other = format!("{name}.");
        let mut last_dot = 0;
        for (i, (a, b)) in prefix.bytes().zip(other.bytes()).enumerate() {
            if a != b {
                break;
            }
            if a == b'.' {
                last_dot = i;
            }
        }
        prefix.truncate(last_dot);
        prefix.push('.');
    }
    prefix.pop();
    prefix
}
