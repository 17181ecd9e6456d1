//! Issue types for bundle analysis results.
//!
//! Every issue carries what the reporter needs to display it: a location,
//! a primary message and optional details.

use enum_dispatch::enum_dispatch;

use crate::core::{EntryLocation, PatternError};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    PatternSyntax,
    EmptyKey,
    EmptySegment,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::PatternSyntax => write!(f, "pattern-syntax"),
            Rule::EmptyKey => write!(f, "empty-key"),
            Rule::EmptySegment => write!(f, "empty-segment"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Bundle Entries
// ============================================================

/// Leaf value that is not a well-formed message pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSyntaxIssue {
    pub location: EntryLocation,
    pub key: String,
    pub value: String,
    pub error: PatternError,
}

impl PatternSyntaxIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::PatternSyntax
    }
}

/// Entry whose key is empty. It cannot be placed in the namespace tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyKeyIssue {
    pub location: EntryLocation,
    pub value: String,
}

impl EmptyKeyIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::EmptyKey
    }
}

/// Key with an empty segment (`a..b`, `.a`, `a.`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptySegmentIssue {
    pub location: EntryLocation,
    pub key: String,
}

impl EmptySegmentIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::EmptySegment
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// Bundle file could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while analysing a bundle.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    PatternSyntax(PatternSyntaxIssue),
    EmptyKey(EmptyKeyIssue),
    EmptySegment(EmptySegmentIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::PatternSyntax(_) => PatternSyntaxIssue::severity(),
            Issue::EmptyKey(_) => EmptyKeyIssue::severity(),
            Issue::EmptySegment(_) => EmptySegmentIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::PatternSyntax(_) => PatternSyntaxIssue::rule(),
            Issue::EmptyKey(_) => EmptyKeyIssue::rule(),
            Issue::EmptySegment(_) => EmptySegmentIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// An entry inside a bundle file.
    Entry(&'a EntryLocation),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types and dispatched on the `Issue` enum
/// through `enum_dispatch`.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for PatternSyntaxIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Entry(&self.location)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        match self.error {
            PatternError::UnmatchedBraces { .. } => {
                Some("quote literal braces with single quotes, e.g. '{'")
            }
            _ => None,
        }
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} (\"{}\")", self.error, self.value))
    }
}

impl Report for EmptyKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Entry(&self.location)
    }

    fn message(&self) -> String {
        "entry has an empty key".to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\")", self.value))
    }
}

impl Report for EmptySegmentIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Entry(&self.location)
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("key contains an empty segment".to_string())
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Entry(location) => &location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Entry(location) => location.line,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
