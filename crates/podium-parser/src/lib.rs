//! Podium Parser - YAML/JSON parser for achievement catalogs
//!
//! This crate converts catalog documents into the typed rule trees defined in
//! `podium-core`. Operators, stat fields, streak types and composite logic are
//! resolved here, once, when the catalog is loaded.
//!
//! Two modes are supported:
//! - [`ParseMode::Strict`] fails on the first malformed node (catalog seeding)
//! - [`ParseMode::Lenient`] replaces malformed nodes with `Criteria::Invalid`
//!   so that stored legacy data still loads

pub mod catalog_parser;
pub mod criteria_parser;
pub mod error;
pub mod yaml_parser;

// Re-export main parser types
pub use catalog_parser::CatalogParser;
pub use criteria_parser::CriteriaParser;
pub use error::{ParseError, Result};
pub use yaml_parser::YamlParser;

/// How malformed criteria are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Any malformed node is an error
    #[default]
    Strict,
    /// Malformed nodes become `Criteria::Invalid` and evaluate to false
    Lenient,
}
