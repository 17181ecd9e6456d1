//! Argument type resolution for bundle values.
//!
//! A resolver scans one format string and returns one [`ArgumentTypeSet`]
//! per argument position. Two strategies exist and one of them is chosen
//! per bundle through [`FormatStyle`]:
//!
//! - `conversion`: printf-style `%` conversions, narrowed per conversion
//! - `pattern`: numbered `{N}` placeholders, every position universal
//!
//! ## Module Structure
//!
//! - `conversion`: ConversionResolver
//! - `pattern`: PatternResolver and PatternError

pub mod conversion;
pub mod pattern;

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

pub use conversion::ConversionResolver;
pub use pattern::{PatternArgument, PatternError, PatternResolver, parse_arguments};

use crate::core::{data::ArgumentTypeSet, tree::NamespaceTree};

/// Upper bound (exclusive) for 0-based argument positions.
pub const MAX_ARGUMENT_INDEX: usize = 10_000;

/// Capability shared by all resolver strategies.
#[enum_dispatch]
pub trait ArgumentTypesResolver {
    /// Argument type sets for `format`, one per position.
    fn resolve(&self, format: &str) -> Result<Vec<ArgumentTypeSet>, PatternError>;
}

/// Resolver strategy selected by configuration.
#[enum_dispatch(ArgumentTypesResolver)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    Pattern(PatternResolver),
    Conversion(ConversionResolver),
}

impl Resolver {
    pub fn for_style(style: FormatStyle) -> Self {
        match style {
            FormatStyle::Conversion => ConversionResolver::new().into(),
            FormatStyle::Pattern => PatternResolver::new().into(),
        }
    }

    pub fn style(&self) -> FormatStyle {
        match self {
            Resolver::Pattern(_) => FormatStyle::Pattern,
            Resolver::Conversion(_) => FormatStyle::Conversion,
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::for_style(FormatStyle::default())
    }
}

/// Format convention used by every value of a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    /// printf-style conversions: `%s`, `%2$d`, `%<tT`
    #[default]
    Conversion,
    /// Numbered message patterns: `{0}`, `{1,number}`
    Pattern,
}

impl std::fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatStyle::Conversion => write!(f, "conversion"),
            FormatStyle::Pattern => write!(f, "pattern"),
        }
    }
}

/// Resolution result for one leaf of a namespace tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafSignature {
    /// Full dotted path of the leaf.
    pub path: String,
    /// Raw value the arguments were resolved from.
    pub value: String,
    pub arguments: Result<Vec<ArgumentTypeSet>, PatternError>,
}

impl LeafSignature {
    pub fn is_ok(&self) -> bool {
        self.arguments.is_ok()
    }
}

/// Resolve every leaf of `tree`, in tree order.
///
/// A failing leaf is recorded and does not stop the remaining leaves.
pub fn resolve_leaves(tree: &NamespaceTree, resolver: &Resolver) -> Vec<LeafSignature> {
    tree.leaves()
        .into_iter()
        .filter_map(|node| {
            let value = node.value()?;
            Some(LeafSignature {
                path: node.path().to_string(),
                value: value.to_string(),
                arguments: resolver.resolve(value),
            })
        })
        .collect()
}
