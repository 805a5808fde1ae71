//! Core data types shared by every extraction engine.
//!
//! ## Module Structure
//!
//! - `error`: Per-file parse errors (lexical and structural)
//! - `record`: ExtractionRecord, RecordKind and SourceLocation

pub mod error;
pub mod record;

pub use error::{LexError, ParseError, ParseErrorKind, StructureError};
pub use record::{ExtractionRecord, RecordKind, SourceLocation};
