//! Core engine: bundle parsing, namespace trees and argument type resolution.
//!
//! A bundle flows through the engine in three steps:
//!
//! 1. **Parse**: `.properties` file → ordered [`Bundle`]
//! 2. **Build**: bundle entries → [`NamespaceTree`]
//! 3. **Resolve**: every leaf value → [`LeafSignature`]
//!
//! ## Module Structure
//!
//! - `analyze`: Per-bundle pipeline and parallel batch analysis
//! - `context`: Merged configuration and bundle selection for a CLI run
//! - `data`: Argument kinds, type sets and bundle contents
//! - `parsers`: `.properties` parser and file encodings
//! - `resolve`: Pattern-style and conversion-style resolvers
//! - `scan`: Bundle discovery under a source root
//! - `tree`: Namespace tree arena and node views

pub mod analyze;
pub mod context;
pub mod data;
pub mod parsers;
pub mod resolve;
pub mod scan;
pub mod tree;

pub use analyze::{BatchAnalysis, BundleAnalysis, analyze_bundle, analyze_bundles};
pub use context::CheckContext;
pub use data::*;
pub use parsers::{Encoding, parse_properties, parse_properties_file};
pub use resolve::{
    ArgumentTypesResolver, ConversionResolver, FormatStyle, LeafSignature, MAX_ARGUMENT_INDEX,
    PatternError, PatternResolver, Resolver, resolve_leaves,
};
pub use scan::{BundleSource, ScanResult, bundle_path, scan_bundles};
pub use tree::{NamespaceTree, Node, NodeId, build_tree};
