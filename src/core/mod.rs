//! Extraction core.
//!
//! ## Module Structure
//!
//! - `data`: Records and per-file errors shared by every engine
//! - `escape`: Backslash escape decoding for string literals
//! - `parsers`: Literal lexer and markup tokenizer/tree builder
//! - `scope`: Scope resolution and tag policy for markup trees
//! - `extract`: The extraction engines
//! - `engine`: Engine selection by file extension
//! - `file_scanner`: File discovery
//! - `batch`: Parallel extraction over many files

pub mod batch;
pub mod data;
pub mod engine;
pub mod escape;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod scope;
pub mod utils;

pub use batch::{BatchResult, FileError, extract_files};
pub use data::{ExtractionRecord, ParseError, RecordKind, SourceLocation};
pub use engine::{Engine, EngineRegistry, Extractor};
