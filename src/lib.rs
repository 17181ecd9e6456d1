//! bundlegen - resource bundle accessor analysis
//!
//! bundlegen reads Java-style `.properties` resource bundles, turns their
//! dotted keys into a namespace tree for nested typed accessors, and
//! resolves the argument types each message accepts from its format string.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, tree building and argument type resolution
//! - `issues`: Issue type definitions and reporting trait

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
