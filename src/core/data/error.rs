use thiserror::Error;

/// A token that could not be read to its end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated tag")]
    UnterminatedTag,
    #[error("unterminated processing instruction")]
    UnterminatedInstruction,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

/// Brackets or tags that do not nest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("unexpected closing '{0}'")]
    UnexpectedClose(String),
    #[error("expected closing '{expected}', found '{found}'")]
    MismatchedClose { expected: String, found: String },
    #[error("'{0}' is never closed")]
    Unclosed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Failure to extract from a single file.
///
/// Engines are all-or-nothing: when this is returned, no records from the
/// file are. Other files in a batch are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file_path}:{line}: {kind}")]
pub struct ParseError {
    pub file_path: String,
    /// Byte offset of the offending token.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(
        file_path: impl Into<String>,
        offset: usize,
        line: usize,
        kind: impl Into<ParseErrorKind>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            offset,
            line,
            kind: kind.into(),
        }
    }

    pub fn is_lex(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lex(_))
    }

    pub fn is_structure(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Structure(_))
    }
}
