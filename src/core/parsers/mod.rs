//! Bundle file parsers.
//!
//! ## Module Structure
//!
//! - `properties`: Ordered `.properties` parser and file encodings

pub mod properties;

pub use properties::{Encoding, parse_properties, parse_properties_file};
