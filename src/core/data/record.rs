use std::fmt;

use serde::Serialize;

/// Position of an extracted unit in its source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    /// Path of the resource file as given to the engine.
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line)
    }
}

/// What part of the source an extraction record was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "name", rename_all = "camelCase")]
pub enum RecordKind {
    /// A `"key": "value"` entry of a literal string table.
    KeyedString,
    /// The text content of a markup element.
    TextNode,
    /// A single attribute of a void markup element (`alt`, `title`, ...).
    Attribute(String),
    /// A markup element extracted as one indivisible unit: an explicitly
    /// marked void element, or the content of an explicitly marked element
    /// that holds markup but no text.
    WholeElement,
    /// A double-quoted string literal inside embedded server-side code.
    ServerString,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::KeyedString => write!(f, "string"),
            RecordKind::TextNode => write!(f, "text"),
            RecordKind::Attribute(name) => write!(f, "attr:{}", name),
            RecordKind::WholeElement => write!(f, "element"),
            RecordKind::ServerString => write!(f, "code"),
        }
    }
}

/// One unit of translatable text produced by an extraction engine.
///
/// For [`RecordKind::TextNode`] and [`RecordKind::Attribute`] the value is
/// never blank. Keyed strings carry whatever literal the table held, so an
/// empty value is legal there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    /// Stable identifier; present for literal-table entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Decoded, translator-facing text.
    pub value: String,
    /// Guidance for translators, taken from comments or structural context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub kind: RecordKind,
    pub location: SourceLocation,
}

impl ExtractionRecord {
    pub fn keyed(
        key: impl Into<String>,
        value: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
            hint: None,
            kind: RecordKind::KeyedString,
            location,
        }
    }

    pub fn unkeyed(kind: RecordKind, value: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            key: None,
            value: value.into(),
            hint: None,
            kind,
            location,
        }
    }

    pub fn with_hint(mut self, hint: Option<String>) -> Self {
        self.hint = hint;
        self
    }
}
