//! Literal-table engine: `"key": "value"` string tables wrapped in a call,
//! e.g. `foo({ "greeting": "Hello" })`.
//!
//! Only pairs where both sides are double-quoted belong to the localizable
//! surface. Single-quoted literals are code-level constants and the whole
//! pair is dropped.

use tracing::debug;

use crate::core::data::{ExtractionRecord, ParseError, SourceLocation};
use crate::core::escape::{EscapeSyntax, decode_escapes};
use crate::core::extract::table::{table_entries, trailing_comment};
use crate::core::parsers::literal::{RawToken, check_balance, tokenize};
use crate::core::utils::LineIndex;

/// Extract every double-quoted `key: value` pair from a literal table.
pub fn extract_literal_table(
    file_path: &str,
    file_text: &str,
) -> Result<Vec<ExtractionRecord>, ParseError> {
    let lines = LineIndex::new(file_text);
    let lexemes = tokenize(file_path, file_text, &lines)?;
    check_balance(file_path, &lexemes)?;

    let mut records = Vec::new();
    for entry in table_entries(&lexemes) {
        let key = &lexemes[entry.key];
        let value = &lexemes[entry.value];

        if key.token == RawToken::SingleQuoted || value.token == RawToken::SingleQuoted {
            debug!(
                file = file_path,
                line = key.line,
                "skipping single-quoted entry"
            );
            continue;
        }
        if key.token != RawToken::DoubleQuoted || value.token != RawToken::DoubleQuoted {
            continue;
        }

        let decoded = decode_escapes(value.string_body(file_text), EscapeSyntax::CFamily);
        let hint = trailing_comment(&lexemes, entry.value, file_text).map(str::to_string);

        records.push(
            ExtractionRecord::keyed(
                key.string_body(file_text),
                decoded,
                SourceLocation::new(file_path, key.line),
            )
            .with_hint(hint),
        );
    }

    debug!(file = file_path, count = records.len(), "extracted literal table");
    Ok(records)
}
