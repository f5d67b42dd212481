//! One-character lookahead over a [`CharSource`].
//!
//! Invariants
//! - `current` always holds the next unconsumed character, or `None` once the
//!   source is exhausted. Every lexical and structural decision is made by
//!   inspecting it, and every consumer advances past what it used.
//! - `line`/`col` describe the position of `current`.
use crate::{
    error::{Error, SyntaxError},
    source::CharSource,
};

#[derive(Debug)]
pub(crate) struct Cursor<S> {
    source: S,
    current: Option<char>,
    line: usize,
    col: usize,
}

impl<S: CharSource> Cursor<S> {
    /// Wraps `source` and caches its first character.
    pub(crate) fn new(source: S) -> Result<Self, Error> {
        let mut cursor = Self {
            source,
            current: None,
            line: 1,
            col: 0,
        };
        cursor.advance()?;
        Ok(cursor)
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.current
    }

    /// Replaces the cached character with the next one from the source and
    /// returns it.
    pub(crate) fn advance(&mut self) -> Result<Option<char>, Error> {
        if self.current == Some('\n') {
            self.line += 1;
            self.col = 0;
        }
        self.current = self.source.next_char()?;
        if self.current.is_some() {
            self.col += 1;
        }
        Ok(self.current)
    }

    pub(crate) fn skip_whitespace(&mut self) -> Result<(), Error> {
        while self.current.is_some_and(char::is_whitespace) {
            self.advance()?;
        }
        Ok(())
    }

    /// Builds a syntax error positioned at the cached character.
    pub(crate) fn error(&self, kind: SyntaxError) -> Error {
        Error::Syntax {
            kind,
            line: self.line,
            column: self.col,
        }
    }
}
