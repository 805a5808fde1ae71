//! Token stream for literal string-table resources (JS and Go flavoured).
//!
//! The lexer only knows the shapes a string table is written in: comments,
//! quoted literals, brackets, separators and identifiers. Anything else is a
//! lexical error, which fails the file.

use std::ops::Range;

use logos::{Lexer, Logos};

use crate::core::data::{LexError, ParseError, StructureError};
use crate::core::utils::LineIndex;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,
    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    SingleQuoted,
    /// Raw string; may span lines, no escapes.
    #[regex(r"`[^`]*`")]
    Backtick,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Identifier,
    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,
    #[regex(r"[.;=+\-*/%<>!&|?~^@#]")]
    Punct,
}

/// Consume the rest of a `/* ... */` comment; unterminated is an error.
fn block_comment(lex: &mut Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

impl RawToken {
    pub fn is_comment(&self) -> bool {
        matches!(self, RawToken::LineComment | RawToken::BlockComment)
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self,
            RawToken::DoubleQuoted | RawToken::SingleQuoted | RawToken::Backtick
        )
    }

    fn opening(&self) -> Option<char> {
        match self {
            RawToken::OpenBrace => Some('{'),
            RawToken::OpenBracket => Some('['),
            RawToken::OpenParen => Some('('),
            _ => None,
        }
    }

    fn closing(&self) -> Option<char> {
        match self {
            RawToken::CloseBrace => Some('}'),
            RawToken::CloseBracket => Some(']'),
            RawToken::CloseParen => Some(')'),
            _ => None,
        }
    }
}

/// A token with its byte span and starting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: RawToken,
    pub span: Range<usize>,
    pub line: usize,
}

impl Lexeme {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    /// Literal body without its surrounding quotes.
    pub fn string_body<'a>(&self, source: &'a str) -> &'a str {
        let text = self.text(source);
        &text[1..text.len() - 1]
    }

    /// Comment text without its markers, trimmed.
    pub fn comment_body<'a>(&self, source: &'a str) -> &'a str {
        let text = self.text(source);
        match self.token {
            RawToken::LineComment => text[2..].trim(),
            RawToken::BlockComment => text[2..text.len() - 2].trim(),
            _ => text,
        }
    }
}

/// Tokenize `source`, failing on the first lexical error.
pub fn tokenize(
    file_path: &str,
    source: &str,
    lines: &LineIndex,
) -> Result<Vec<Lexeme>, ParseError> {
    let mut lexer = RawToken::lexer(source);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let line = lines.line_of(span.start);
        match result {
            Ok(token) => lexemes.push(Lexeme { token, span, line }),
            Err(()) => {
                let cause = lex_error_at(&source[span.start..]);
                return Err(ParseError::new(file_path, span.start, line, cause));
            }
        }
    }

    Ok(lexemes)
}

fn lex_error_at(rest: &str) -> LexError {
    if rest.starts_with('"') || rest.starts_with('\'') || rest.starts_with('`') {
        LexError::UnterminatedString
    } else if rest.starts_with("/*") {
        LexError::UnterminatedComment
    } else {
        LexError::UnexpectedCharacter(rest.chars().next().unwrap_or('\0'))
    }
}

/// Verify that braces, brackets and parentheses nest properly.
pub fn check_balance(
    file_path: &str,
    lexemes: &[Lexeme],
) -> Result<(), ParseError> {
    let mut stack: Vec<(char, &Lexeme)> = Vec::new();

    for lexeme in lexemes {
        if let Some(open) = lexeme.token.opening() {
            stack.push((open, lexeme));
        } else if let Some(close) = lexeme.token.closing() {
            let error = match stack.pop() {
                Some((open, _)) if matching_close(open) == close => continue,
                Some((open, _)) => StructureError::MismatchedClose {
                    expected: matching_close(open).to_string(),
                    found: close.to_string(),
                },
                None => StructureError::UnexpectedClose(close.to_string()),
            };
            return Err(ParseError::new(
                file_path,
                lexeme.span.start,
                lexeme.line,
                error,
            ));
        }
    }

    match stack.pop() {
        Some((open, lexeme)) => Err(ParseError::new(
            file_path,
            lexeme.span.start,
            lexeme.line,
            StructureError::Unclosed(open.to_string()),
        )),
        None => Ok(()),
    }
}

fn matching_close(open: char) -> char {
    match open {
        '{' => '}',
        '[' => ']',
        _ => ')',
    }
}
