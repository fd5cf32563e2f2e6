//! Core data types shared by the scanner, collector, store and aggregator.

pub mod document;
pub mod group;
pub mod item;

pub use document::{CombinedDocument, DocumentKind, DocumentSection};
pub use group::{Property, PropertyGroup, UNKNOWN_GROUP_NAME, UNKNOWN_SOURCE_TYPE};
pub use item::{ItemDeprecation, ItemKey, ItemMetadata, ItemType, MetadataDocument};
