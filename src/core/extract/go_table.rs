//! Go string tables: `map[string]string{ "Key": "value", ... }` literals.
//!
//! Differences from the JS-style table:
//! - keys may be identifiers bound by a `const` declaration in the same file;
//! - values may be backtick raw strings, taken verbatim;
//! - the comment block directly above an entry is its hint.

use std::collections::HashMap;

use tracing::debug;

use crate::core::data::{ExtractionRecord, ParseError, SourceLocation};
use crate::core::escape::{EscapeSyntax, decode_escapes};
use crate::core::extract::table::{leading_comments, table_entries, trailing_comment};
use crate::core::parsers::literal::{Lexeme, RawToken, check_balance, tokenize};
use crate::core::utils::LineIndex;

/// Extract every string entry of the Go map literals in a file.
pub fn extract_go_table(
    file_path: &str,
    file_text: &str,
) -> Result<Vec<ExtractionRecord>, ParseError> {
    let lines = LineIndex::new(file_text);
    let lexemes = tokenize(file_path, file_text, &lines)?;
    check_balance(file_path, &lexemes)?;

    let constants = string_constants(&lexemes, file_text);

    let mut records = Vec::new();
    for entry in table_entries(&lexemes) {
        let key = &lexemes[entry.key];
        let value = &lexemes[entry.value];

        let resolved_key = match key.token {
            RawToken::DoubleQuoted | RawToken::Backtick => key.string_body(file_text),
            RawToken::Identifier => match constants.get(key.text(file_text)) {
                Some(&name) => name,
                None => {
                    debug!(
                        file = file_path,
                        line = key.line,
                        identifier = key.text(file_text),
                        "skipping entry with unresolved key"
                    );
                    continue;
                }
            },
            _ => continue,
        };

        let resolved_value = match value.token {
            RawToken::DoubleQuoted => {
                decode_escapes(value.string_body(file_text), EscapeSyntax::Go)
            }
            RawToken::Backtick => raw_string(value.string_body(file_text)),
            _ => continue,
        };

        let mut hints = leading_comments(&lexemes, entry.key, file_text);
        hints.extend(trailing_comment(&lexemes, entry.value, file_text));
        let hint = (!hints.is_empty()).then(|| hints.join("\n"));

        records.push(
            ExtractionRecord::keyed(
                resolved_key,
                resolved_value,
                SourceLocation::new(file_path, key.line),
            )
            .with_hint(hint),
        );
    }

    debug!(file = file_path, count = records.len(), "extracted go table");
    Ok(records)
}

/// Go drops carriage returns from raw string literals.
fn raw_string(body: &str) -> String {
    body.replace('\r', "")
}

/// Map of `const name = "value"` declarations, including grouped
/// `const ( ... )` blocks and typed constants.
fn string_constants<'a>(lexemes: &[Lexeme], source: &'a str) -> HashMap<&'a str, &'a str> {
    let code: Vec<&Lexeme> = lexemes.iter().filter(|l| !l.token.is_comment()).collect();
    let mut constants = HashMap::new();

    let mut i = 0;
    while i < code.len() {
        if !(code[i].token == RawToken::Identifier && code[i].text(source) == "const") {
            i += 1;
            continue;
        }
        i += 1;
        if code.get(i).is_some_and(|l| l.token == RawToken::OpenParen) {
            i += 1;
            while i < code.len() && code[i].token != RawToken::CloseParen {
                match const_spec(&code[i..], source) {
                    Some((name, value, used)) => {
                        constants.insert(name, value);
                        i += used;
                    }
                    None => i += 1,
                }
            }
        } else if let Some((name, value, used)) = const_spec(&code[i..], source) {
            constants.insert(name, value);
            i += used;
        }
    }

    constants
}

/// `name [type] = "value"`; returns the name, literal body and tokens used.
fn const_spec<'a>(code: &[&Lexeme], source: &'a str) -> Option<(&'a str, &'a str, usize)> {
    let name = code.first().filter(|l| l.token == RawToken::Identifier)?;
    let mut next = 1;
    if code.get(next)?.token == RawToken::Identifier {
        next += 1;
    }
    let assign = code.get(next)?;
    if assign.token != RawToken::Punct || assign.text(source) != "=" {
        return None;
    }
    let literal = code
        .get(next + 1)
        .filter(|l| matches!(l.token, RawToken::DoubleQuoted | RawToken::Backtick))?;
    Some((name.text(source), literal.string_body(source), next + 2))
}
