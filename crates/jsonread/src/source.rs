//! Pull-based character sources.
//!
//! The decoder never looks at more than one character at a time, and never
//! needs to seek, so a source only has to hand out the next character or
//! report that the input is exhausted.
use std::{
    io::{self, BufRead, BufReader, Read},
    str::Chars,
};

/// A source of already-decoded Unicode characters.
pub trait CharSource {
    /// Returns the next character, or `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying input. The decoder surfaces it
    /// unchanged as [`Error::Io`](crate::Error::Io).
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }
}

/// Characters of a borrowed string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Reads the characters of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Adapts any `char` iterator.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    /// Reads the items of `iter`.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter(),
        }
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.iter.next())
    }
}

/// Decodes UTF-8 from a byte reader.
///
/// The reader is buffered internally, so there is no need to wrap it in a
/// [`BufReader`] first. Malformed UTF-8 is reported as an
/// [`io::ErrorKind::InvalidData`] error.
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: BufReader<R>,
}

impl<R: Read> ReadSource<R> {
    /// Wraps `reader`, which must produce UTF-8.
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
        }
    }

    /// Unwraps the source, discarding any buffered bytes.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    /// Finishes a sequence whose first `have` bytes sit at the end of the
    /// buffer. Bytes are pulled one refill at a time until `width` are
    /// available or the reader runs dry.
    fn read_split_sequence(&mut self, have: usize, width: usize) -> io::Result<char> {
        let mut seq = [0u8; 4];
        seq[..have].copy_from_slice(&self.inner.buffer()[..have]);
        self.inner.consume(have);

        let mut len = have;
        while len < width {
            let buf = self.inner.fill_buf()?;
            let Some(&byte) = buf.first() else {
                return Err(invalid_utf8());
            };
            seq[len] = byte;
            len += 1;
            self.inner.consume(1);
        }

        match bstr::decode_utf8(&seq[..width]) {
            (Some(ch), n) if n == width => Ok(ch),
            _ => Err(invalid_utf8()),
        }
    }
}

impl<R: Read> CharSource for ReadSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let buf = self.inner.fill_buf()?;
        if buf.is_empty() {
            return Ok(None);
        }

        let (ch, size) = bstr::decode_utf8(buf);
        if let Some(ch) = ch {
            self.inner.consume(size);
            return Ok(Some(ch));
        }

        // A valid prefix running into the end of the buffer may just be
        // split across refills.
        let width = utf8_width(buf[0]);
        if width > buf.len() && size == buf.len() {
            return self.read_split_sequence(size, width).map(Some);
        }
        Err(invalid_utf8())
    }
}

/// Expected sequence length for a UTF-8 lead byte, or 0 if `byte` cannot
/// start a sequence.
fn utf8_width(byte: u8) -> usize {
    match byte {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8")
}
