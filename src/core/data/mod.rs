//! Core data types shared by the tree builder, the resolvers and the CLI.
//!
//! ## Module Structure
//!
//! - `argument`: Argument kinds and argument type sets
//! - `bundle`: Ordered bundle contents (Bundle, BundleEntry, EntryLocation)

pub mod argument;
pub mod bundle;

pub use argument::{ArgumentKind, ArgumentTypeSet};
pub use bundle::{Bundle, BundleEntry, EntryLocation};
