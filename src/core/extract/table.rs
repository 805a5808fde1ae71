//! Entry detection shared by the literal-table dialects.
//!
//! An entry is `key : value` where the key opens an entry (it follows `{` or
//! `,`) and the value closes it (it is followed by `,` or `}`). Comments are
//! transparent for this shape and only matter for hints.

use tracing::debug;

use crate::core::parsers::literal::{Lexeme, RawToken};

/// Indices into the lexeme slice of one `key : value` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry {
    pub key: usize,
    pub value: usize,
}

/// Find every `key : value` pair, in source order.
pub fn table_entries(lexemes: &[Lexeme]) -> Vec<TableEntry> {
    let code: Vec<usize> = lexemes
        .iter()
        .enumerate()
        .filter(|(_, l)| !l.token.is_comment())
        .map(|(i, _)| i)
        .collect();

    let mut entries = Vec::new();
    for (pos, &key) in code.iter().enumerate() {
        let Some(&colon) = code.get(pos + 1) else {
            break;
        };
        if lexemes[colon].token != RawToken::Colon {
            continue;
        }
        let key_token = lexemes[key].token;
        if !key_token.is_string() && key_token != RawToken::Identifier {
            continue;
        }
        let opens_entry = pos > 0
            && matches!(
                lexemes[code[pos - 1]].token,
                RawToken::OpenBrace | RawToken::Comma
            );
        if !opens_entry {
            continue;
        }
        let Some(&value) = code.get(pos + 2) else {
            continue;
        };
        let closes_entry = code.get(pos + 3).is_some_and(|&next| {
            matches!(lexemes[next].token, RawToken::Comma | RawToken::CloseBrace)
        });
        if !closes_entry {
            debug!(line = lexemes[key].line, "skipping entry whose value is not a single token");
            continue;
        }
        entries.push(TableEntry { key, value });
    }

    entries
}

/// Last line a lexeme touches (raw strings and block comments may span lines).
pub fn end_line(lexeme: &Lexeme, source: &str) -> usize {
    lexeme.line + lexeme.text(source).matches('\n').count()
}

/// Comment that starts on the value's last line, right after the value and
/// its optional entry comma.
pub fn trailing_comment<'a>(lexemes: &[Lexeme], value: usize, source: &'a str) -> Option<&'a str> {
    let value_line = end_line(&lexemes[value], source);
    let mut next = value + 1;
    if lexemes.get(next)?.token == RawToken::Comma {
        next += 1;
    }
    let candidate = lexemes.get(next)?;
    (candidate.token.is_comment() && candidate.line == value_line)
        .then(|| candidate.comment_body(source))
}

/// Block of comments directly above `key`, each on its own line with no
/// blank line between the block and the key.
pub fn leading_comments<'a>(lexemes: &[Lexeme], key: usize, source: &'a str) -> Vec<&'a str> {
    let mut comments = Vec::new();
    let mut expected_line = lexemes[key].line;
    let mut index = key;

    while index > 0 {
        let candidate = &lexemes[index - 1];
        if !candidate.token.is_comment() || end_line(candidate, source) + 1 != expected_line {
            break;
        }
        let trails_code = index >= 2
            && !lexemes[index - 2].token.is_comment()
            && end_line(&lexemes[index - 2], source) == candidate.line;
        if trails_code {
            break;
        }
        comments.push(candidate.comment_body(source));
        expected_line = candidate.line;
        index -= 1;
    }

    comments.reverse();
    comments
}
