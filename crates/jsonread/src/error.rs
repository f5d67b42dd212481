use std::io;

use thiserror::Error;

/// Errors returned by [`JsonDecoder`](crate::JsonDecoder).
///
/// Every error is fatal to the read that produced it: no partial value is
/// returned and the decoder does not try to resynchronize.
#[derive(Error, Debug)]
pub enum Error {
    /// No input source was supplied.
    #[error("missing input source")]
    MissingSource,
    /// The underlying character source failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The input is not well-formed JSON.
    #[error("{kind} at {line}:{column}")]
    Syntax {
        /// What went wrong.
        kind: SyntaxError,
        /// 1-based line of the lookahead character when the error was raised.
        line: usize,
        /// 1-based column of the lookahead character when the error was raised.
        column: usize,
    },
    /// The decoded root value is not of the requested type.
    #[error(transparent)]
    Type(#[from] TypeMismatch),
}

impl Error {
    /// Returns `true` for malformed-input errors.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }

    /// Returns `true` when the character source itself failed.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns `true` when the read was rejected before any input was looked
    /// at.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingSource)
    }

    /// The syntax error kind, if this is a malformed-input error.
    #[must_use]
    pub fn syntax_kind(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// The `(line, column)` of a syntax error.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Syntax { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }
}

/// The ways in which input text can fail to decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("invalid key: expected '\"'")]
    InvalidKey,
    #[error("missing key/value delimiter")]
    MissingKeyDelimiter,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("illegal character {0:?} in string")]
    IllegalCharacter(char),
    #[error("unterminated escape sequence")]
    UnterminatedEscape,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("incomplete unicode escape sequence")]
    IncompleteUnicodeEscape,
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("invalid keyword, expected `{0}`")]
    InvalidKeyword(&'static str),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unmatched closing '{0}'")]
    UnmatchedClose(char),
}

/// A decoded value did not have the type the caller asked for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    /// The requested kind.
    pub expected: &'static str,
    /// The kind actually decoded.
    pub found: &'static str,
}
