//! Extraction engines.
//!
//! Each engine is a pure function from one file's text to its ordered
//! records, or a single `ParseError` with no records at all.

pub mod go_table;
pub mod literal_table;
pub mod markup;
pub mod table;

pub use go_table::extract_go_table;
pub use literal_table::extract_literal_table;
pub use markup::{extract_markup, extract_markup_with_policy};
