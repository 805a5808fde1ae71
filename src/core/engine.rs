//! Engine selection by file extension.
//!
//! Every engine implements [`Extractor`]; [`Engine`] wraps them so the driver
//! can hold a heterogeneous set without boxing. Dispatch goes through
//! `enum_dispatch`.

use std::path::Path;

use enum_dispatch::enum_dispatch;

use crate::config::Config;
use crate::core::data::{ExtractionRecord, ParseError};
use crate::core::extract::{extract_go_table, extract_literal_table, extract_markup_with_policy};
use crate::core::scope::TagPolicy;

/// A per-file extraction engine.
#[enum_dispatch]
pub trait Extractor {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    fn extract(
        &self,
        file_path: &str,
        file_text: &str,
    ) -> Result<Vec<ExtractionRecord>, ParseError>;
}

/// `"key": "value"` tables wrapped in a JS call.
#[derive(Debug, Clone, Default)]
pub struct LiteralTableEngine;

impl Extractor for LiteralTableEngine {
    fn name(&self) -> &'static str {
        "literal-table"
    }

    fn extract(
        &self,
        file_path: &str,
        file_text: &str,
    ) -> Result<Vec<ExtractionRecord>, ParseError> {
        extract_literal_table(file_path, file_text)
    }
}

/// Go `map[string]string` tables.
#[derive(Debug, Clone, Default)]
pub struct GoTableEngine;

impl Extractor for GoTableEngine {
    fn name(&self) -> &'static str {
        "go-table"
    }

    fn extract(
        &self,
        file_path: &str,
        file_text: &str,
    ) -> Result<Vec<ExtractionRecord>, ParseError> {
        extract_go_table(file_path, file_text)
    }
}

#[derive(Debug, Clone)]
pub struct MarkupEngine {
    pub scope_attribute: String,
    pub policy: TagPolicy,
}

impl Extractor for MarkupEngine {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn extract(
        &self,
        file_path: &str,
        file_text: &str,
    ) -> Result<Vec<ExtractionRecord>, ParseError> {
        extract_markup_with_policy(file_path, file_text, &self.scope_attribute, &self.policy)
    }
}

#[enum_dispatch(Extractor)]
#[derive(Debug, Clone)]
pub enum Engine {
    LiteralTable(LiteralTableEngine),
    GoTable(GoTableEngine),
    Markup(MarkupEngine),
}

/// Engines configured for a run, keyed by file extension.
#[derive(Debug, Clone)]
pub struct EngineRegistry {
    entries: Vec<(String, Engine)>,
}

impl EngineRegistry {
    pub fn from_config(config: &Config) -> Self {
        let markup = Engine::from(MarkupEngine {
            scope_attribute: config.scope_attribute.clone(),
            policy: config.tag_policy.clone(),
        });

        let mut entries = Vec::new();
        for ext in &config.literal_table_extensions {
            entries.push((normalize(ext), Engine::from(LiteralTableEngine)));
        }
        for ext in &config.go_table_extensions {
            entries.push((normalize(ext), Engine::from(GoTableEngine)));
        }
        for ext in &config.markup_extensions {
            entries.push((normalize(ext), markup.clone()));
        }
        Self { entries }
    }

    /// The engine for a file, or `None` when its extension is not handled.
    /// When an extension is listed twice, the first listing wins.
    pub fn for_path(&self, path: &Path) -> Option<&Engine> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, engine)| engine)
    }

    pub fn handles(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }
}

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}
