//! Utility helpers shared by the extraction engines.
//!
//! ## Module Structure
//!
//! - `line_index`: Byte offset to line number lookups
//! - `text`: Whitespace normalization for extracted text

pub mod line_index;
pub mod text;

pub use line_index::LineIndex;
pub use text::*;
