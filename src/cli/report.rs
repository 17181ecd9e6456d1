//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Trees are drawn with box
//! characters, one row per node, leaf values aligned in a second column.

use std::{
    collections::HashMap,
    io::{self, Write},
};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary, TreeSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{ArgumentKind, ArgumentTypeSet, BundleAnalysis, LeafSignature, NamespaceTree, Node};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(bundles: usize, entries: usize) {
    print_success_to(bundles, entries, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(bundles: usize, entries: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {}, {} {} - no issues found",
            bundles,
            if bundles == 1 { "bundle" } else { "bundles" },
            entries,
            if entries == 1 { "entry" } else { "entries" }
        )
        .green()
    );
}

/// Print a warning about bundles that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} bundle(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line
    match issue.location() {
        ReportLocation::Entry(location) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}",
                "-->".blue(),
                location.file_path,
                location.line
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            if total_problems == 1 {
                "problem"
            } else {
                "problems"
            },
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Entry(location) => Some(location.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Trees
// ============================================================

/// One drawn row: the tree column and the optional detail column.
struct TreeRow {
    label: String,
    detail: Option<TreeDetail>,
}

enum TreeDetail {
    Value(String),
    Error(String),
}

pub fn print_tree(analysis: &BundleAnalysis) {
    print_tree_to(analysis, &mut io::stdout().lock());
}

pub fn print_tree_to<W: Write>(analysis: &BundleAnalysis, writer: &mut W) {
    let signatures: HashMap<&str, &LeafSignature> = analysis
        .signatures
        .iter()
        .map(|s| (s.path.as_str(), s))
        .collect();

    let mut rows = Vec::new();
    collect_rows(analysis.tree.root(), "", &signatures, &mut rows);

    let label_width = rows
        .iter()
        .map(|row| UnicodeWidthStr::width(row.label.as_str()))
        .max()
        .unwrap_or(0);

    let _ = writeln!(
        writer,
        "{}  {}",
        analysis.source.name.bold(),
        analysis.source.path.display().to_string().dimmed()
    );

    for row in &rows {
        let Some(detail) = &row.detail else {
            let _ = writeln!(writer, "{}", row.label);
            continue;
        };
        let padding = label_width - UnicodeWidthStr::width(row.label.as_str());
        let detail = match detail {
            TreeDetail::Value(value) => value.dimmed(),
            TreeDetail::Error(error) => format!("{} {}", FAILURE_MARK, error).red(),
        };
        let _ = writeln!(writer, "{}{:padding$}  {}", row.label, "", detail);
    }

    if rows.is_empty() {
        let _ = writeln!(writer, "{}", "(no entries)".dimmed());
    }
}

fn collect_rows(
    node: Node<'_>,
    prefix: &str,
    signatures: &HashMap<&str, &LeafSignature>,
    rows: &mut Vec<TreeRow>,
) {
    let count = node.children().len();
    for (i, child) in node.children().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };

        let signature = signatures.get(child.path()).copied();
        let arguments = match signature.map(|s| &s.arguments) {
            Some(Ok(arguments)) => format_arguments(arguments),
            _ => String::new(),
        };
        let detail = signature.map(|s| match &s.arguments {
            Ok(_) => TreeDetail::Value(format!("{:?}", s.value)),
            Err(error) => TreeDetail::Error(error.to_string()),
        });

        rows.push(TreeRow {
            label: format!("{}{}{}{}", prefix, connector, child.name(), arguments),
            detail,
        });

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        collect_rows(child, &child_prefix, signatures, rows);
    }
}

/// `(integer, any)`; `()` for a leaf without arguments.
fn format_arguments(arguments: &[ArgumentTypeSet]) -> String {
    let kinds: Vec<String> = arguments.iter().map(ToString::to_string).collect();
    format!("({})", kinds.join(", "))
}

#[derive(Serialize)]
struct TreeJson<'a> {
    bundle: &'a str,
    file: String,
    tree: &'a NamespaceTree,
    signatures: Vec<SignatureJson<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignatureJson<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    arguments: Option<&'a [ArgumentTypeSet]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferred_kinds: Option<Vec<ArgumentKind>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a LeafSignature> for SignatureJson<'a> {
    fn from(signature: &'a LeafSignature) -> Self {
        match &signature.arguments {
            Ok(arguments) => Self {
                path: &signature.path,
                arguments: Some(arguments),
                preferred_kinds: Some(arguments.iter().map(|a| a.preferred_kind()).collect()),
                error: None,
            },
            Err(error) => Self {
                path: &signature.path,
                arguments: None,
                preferred_kinds: None,
                error: Some(error.to_string()),
            },
        }
    }
}

pub fn print_tree_json(analysis: &BundleAnalysis) -> Result<()> {
    print_tree_json_to(analysis, &mut io::stdout().lock())
}

pub fn print_tree_json_to<W: Write>(analysis: &BundleAnalysis, writer: &mut W) -> Result<()> {
    let output = TreeJson {
        bundle: &analysis.source.name,
        file: analysis.source.path.display().to_string(),
        tree: &analysis.tree,
        signatures: analysis.signatures.iter().map(SignatureJson::from).collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &output).context("Failed to serialize tree")?;
    writeln!(writer).context("Failed to write tree")?;
    Ok(())
}

// ============================================================
// Command output
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) -> Result<()> {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(result.bundles_checked, result.entries_checked);
            }
            print_parse_warning(result.parse_error_count, verbose);
        }
        CommandSummary::Tree(summary) => print_tree_summary(summary, &result.issues)?,
        CommandSummary::Init(summary) => print_init(summary),
    }
    Ok(())
}

fn print_tree_summary(summary: &TreeSummary, issues: &[Issue]) -> Result<()> {
    if summary.json {
        return print_tree_json(&summary.analysis);
    }

    print_tree(&summary.analysis);
    if !issues.is_empty() {
        println!();
        report(issues);
    }
    Ok(())
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        Some(error) => eprintln!("Error: {}", error),
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        ),
    }
}

// ============================================================
// Tests
// ============================================================
