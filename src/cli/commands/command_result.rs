use std::path::PathBuf;

#[derive(Debug)]
pub enum CommandSummary {
    Generate(GenerateSummary),
    Aggregate(AggregateSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub files_scanned: usize,
    pub property_count: usize,
    pub group_count: usize,
    pub merged_count: usize,
    /// None when nothing was collected and no file was written.
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct AggregateSummary {
    pub section_count: usize,
    pub property_count: usize,
    pub output: PathBuf,
    pub render_target: PathBuf,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// A non-fatal problem a command ran into, tied to the file it came from.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub origin: PathBuf,
    pub message: String,
}

/// Result of running a propdoc command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub warnings: Vec<Diagnostic>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            warnings: Vec::new(),
        }
    }
}
