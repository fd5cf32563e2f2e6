//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all propdoc
//! commands. It uses clap's derive API for declarative argument parsing.
//!
//! ## Commands
//!
//! - `generate`: Scan configuration sources and write the metadata document
//! - `aggregate`: Combine metadata documents from several modules into one
//! - `init`: Initialize propdoc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::collect::GroupStrategy;
use crate::core::data::DocumentKind;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Generate(cmd)) => cmd.args.common.verbose,
            Some(Command::Aggregate(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory (config discovery starts here)
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory the metadata document is written to (overrides config file)
    #[arg(long)]
    pub metadata_dir: Option<PathBuf>,

    /// How to fabricate groups for sources that declare none
    #[arg(long, value_enum, default_value = "prefix")]
    pub groups: GroupStrategy,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Directories to scan (overrides config file)
    pub roots: Vec<PathBuf>,
    #[command(flatten)]
    pub args: GenerateArgs,
}

#[derive(Debug, Parser)]
pub struct AggregateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JSON file describing the inputs and their filters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Title of the combined document
    #[arg(long)]
    pub name: Option<String>,

    /// Description of the combined document
    #[arg(long)]
    pub description: Option<String>,

    /// Output flavor of the combined document [default: markdown]
    #[arg(long, value_enum)]
    pub kind: Option<DocumentKind>,

    /// Where the combined model is written [default: project-properties.json]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Treat a missing input as an empty section instead of an error
    #[arg(long)]
    pub allow_missing_input: bool,

    /// List every module's occurrence of a property instead of one entry per name
    #[arg(long)]
    pub keep_duplicates: bool,
}

#[derive(Debug, Args)]
pub struct AggregateCommand {
    /// Metadata documents or module directories to combine
    pub inputs: Vec<PathBuf>,
    #[command(flatten)]
    pub args: AggregateArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan configuration sources for `${...}` placeholders and write the metadata document
    Generate(GenerateCommand),
    /// Combine metadata documents from several modules into one renderable document
    Aggregate(AggregateCommand),
    /// Initialize a new .propdocrc.json configuration file
    Init,
}
