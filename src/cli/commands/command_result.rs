use crate::core::BundleAnalysis;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Tree(TreeSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct TreeSummary {
    pub analysis: BundleAnalysis,
    pub json: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    /// Set when the config file could not be created.
    pub error: Option<String>,
}

/// Result of running a bundlegen command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues found, sorted.
    pub issues: Vec<Issue>,
    /// Number of bundles that failed to read or parse.
    pub parse_error_count: usize,
    /// Number of bundles that were analysed successfully.
    pub bundles_checked: usize,
    /// Number of entries across all analysed bundles.
    pub entries_checked: usize,
}
