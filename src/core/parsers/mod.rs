//! Tokenizers for the resource formats the engines read.
//!
//! - `literal`: string tables written as JS or Go source
//! - `markup`: HTML/XHTML pages, optionally with embedded server code

pub mod literal;
pub mod markup;
