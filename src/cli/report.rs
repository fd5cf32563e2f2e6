//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow propdoc to be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    AggregateSummary, CommandResult, CommandSummary, Diagnostic, GenerateSummary, InitSummary,
};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
    print_warnings(&result.warnings, verbose);
}

/// Print a command summary to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_to<W: Write>(result: &CommandResult, _verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Generate(summary) => print_generate(summary, writer),
        CommandSummary::Aggregate(summary) => print_aggregate(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_generate<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    match &summary.output {
        Some(output) => {
            let mut parts = vec![format!(
                "{} propert{}",
                summary.property_count,
                if summary.property_count == 1 { "y" } else { "ies" }
            )];
            parts.push(format!(
                "{} group{}",
                summary.group_count,
                if summary.group_count == 1 { "" } else { "s" }
            ));
            if summary.merged_count > 0 {
                parts.push(format!("{} merged", summary.merged_count));
            }
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Scanned {} file{}, wrote {} ({})",
                    summary.files_scanned,
                    if summary.files_scanned == 1 { "" } else { "s" },
                    output.display(),
                    parts.join(", ")
                )
                .green()
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Scanned {} file{} - nothing to write",
                    summary.files_scanned,
                    if summary.files_scanned == 1 { "" } else { "s" }
                )
                .green()
            );
        }
    }
}

fn print_aggregate<W: Write>(summary: &AggregateSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Combined {} section{} ({} propert{}) into {}",
            summary.section_count,
            if summary.section_count == 1 { "" } else { "s" },
            summary.property_count,
            if summary.property_count == 1 { "y" } else { "ies" },
            summary.output.display()
        )
        .green()
    );
    let _ = writeln!(writer, "  render target: {}", summary.render_target.display());
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

/// Print warnings to stderr. Without `-v` only a count is shown.
pub fn print_warnings(warnings: &[Diagnostic], verbose: bool) {
    print_warnings_to(warnings, verbose, &mut io::stderr().lock());
}

pub fn print_warnings_to<W: Write>(warnings: &[Diagnostic], verbose: bool, writer: &mut W) {
    if warnings.is_empty() {
        return;
    }
    if verbose {
        for warning in warnings {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "warning:".bold().yellow(),
                warning.origin.display(),
                warning.message
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) reported problems (use {} for details)",
            "warning:".bold().yellow(),
            warnings.len(),
            "-v".cyan()
        );
    }
}
