//! locscan - localizable text extraction
//!
//! locscan finds the translatable text in resource files so a translation
//! catalog can be built from it: `"key": "value"` string tables (JS and Go
//! flavoured) and HTML-like pages, where an inheritable scope attribute and
//! per-tag defaults decide what is translatable.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, logging, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engines and the batch driver

pub mod cli;
pub mod config;
pub mod core;
