//! Propdoc - configuration property documentation extractor
//!
//! Propdoc is a CLI tool and library that scans XML configuration sources
//! for `${...}` placeholder references, collects the discovered properties
//! into a per-module metadata document, and combines the documents of
//! several modules into a single renderable model.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, collection, storage and aggregation
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;
