use anyhow::Result;
use rayon::prelude::*;

use crate::{
    core::{
        data::{Bundle, EntryLocation},
        parsers::{Encoding, parse_properties_file},
        resolve::{LeafSignature, Resolver, resolve_leaves},
        scan::BundleSource,
        tree::NamespaceTree,
    },
    issues::{EmptyKeyIssue, EmptySegmentIssue, Issue, ParseErrorIssue, PatternSyntaxIssue},
};

/// Everything learned about one bundle.
#[derive(Debug)]
pub struct BundleAnalysis {
    pub source: BundleSource,
    pub tree: NamespaceTree,
    /// One per leaf, in tree order.
    pub signatures: Vec<LeafSignature>,
    /// Unsorted.
    pub issues: Vec<Issue>,
    /// Number of distinct keys in the bundle file.
    pub entry_count: usize,
}

impl BundleAnalysis {
    pub fn failed_leaves(&self) -> impl Iterator<Item = &LeafSignature> {
        self.signatures.iter().filter(|s| !s.is_ok())
    }
}

/// Parse one bundle, build its tree and resolve every leaf.
///
/// Fails only when the file cannot be read or parsed. Problems with
/// individual entries become issues.
pub fn analyze_bundle(
    source: &BundleSource,
    resolver: &Resolver,
    encoding: Encoding,
) -> Result<BundleAnalysis> {
    let bundle = parse_properties_file(&source.path, encoding)?;
    Ok(analyze_parsed(source.clone(), &bundle, resolver))
}

fn analyze_parsed(source: BundleSource, bundle: &Bundle, resolver: &Resolver) -> BundleAnalysis {
    let file_path = source.path.to_string_lossy().into_owned();
    let location = |line| EntryLocation::new(file_path.clone(), line);

    let mut issues: Vec<Issue> = Vec::new();

    for entry in bundle.entries() {
        if entry.key.is_empty() {
            issues.push(Issue::EmptyKey(EmptyKeyIssue {
                location: location(entry.line),
                value: entry.value.clone(),
            }));
        } else if entry.key.split('.').any(str::is_empty) {
            issues.push(Issue::EmptySegment(EmptySegmentIssue {
                location: location(entry.line),
                key: entry.key.clone(),
            }));
        }
    }

    let tree = NamespaceTree::build(bundle.pairs());
    let signatures = resolve_leaves(&tree, resolver);

    for signature in &signatures {
        if let Err(error) = &signature.arguments {
            // Leaf paths are the bundle keys they were built from.
            let line = bundle.get(&signature.path).map_or(0, |entry| entry.line);
            issues.push(Issue::PatternSyntax(PatternSyntaxIssue {
                location: location(line),
                key: signature.path.clone(),
                value: signature.value.clone(),
                error: error.clone(),
            }));
        }
    }

    BundleAnalysis {
        source,
        tree,
        signatures,
        issues,
        entry_count: bundle.len(),
    }
}

/// Result of analysing many bundles.
#[derive(Debug, Default)]
pub struct BatchAnalysis {
    /// Same order as the input sources.
    pub analyses: Vec<BundleAnalysis>,
    /// Bundles that could not be read or parsed.
    pub parse_errors: Vec<ParseErrorIssue>,
}

impl BatchAnalysis {
    pub fn entry_count(&self) -> usize {
        self.analyses.iter().map(|a| a.entry_count).sum()
    }

    /// All issues, parse errors included. Unsorted.
    pub fn into_issues(self) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .analyses
            .into_iter()
            .flat_map(|analysis| analysis.issues)
            .collect();
        issues.extend(self.parse_errors.into_iter().map(Issue::ParseError));
        issues
    }
}

/// Analyse independent bundles in parallel.
pub fn analyze_bundles(
    sources: &[BundleSource],
    resolver: &Resolver,
    encoding: Encoding,
    verbose: bool,
) -> BatchAnalysis {
    let results: Vec<_> = sources
        .par_iter()
        .map(|source| (source, analyze_bundle(source, resolver, encoding)))
        .collect();

    let mut batch = BatchAnalysis::default();
    for (source, result) in results {
        match result {
            Ok(analysis) => batch.analyses.push(analysis),
            Err(e) => {
                let file_path = source.path.to_string_lossy().into_owned();
                if verbose {
                    eprintln!("Warning: {} - {:#}", file_path, e);
                }
                batch.parse_errors.push(ParseErrorIssue {
                    file_path,
                    error: format!("{:#}", e),
                });
            }
        }
    }
    batch
}
