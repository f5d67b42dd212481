//! The decode driver.
//!
//! A single loop over the cached lookahead character. Structural characters
//! (`]`, `}`, `,`) are handled inline; anything else starts a value, which is
//! either scanned on the spot or, for `[` and `{`, opens a container on the
//! explicit [`ContainerStack`]. No function in the driver recurses, so
//! nesting depth is bounded only by memory.
use std::io::Read;

use log::{debug, trace};

use crate::{
    error::{Error, SyntaxError, TypeMismatch},
    options::DecoderOptions,
    scanner::{Keyword, Scanner, is_number_start},
    source::{CharSource, ReadSource, StrSource},
    stack::{CloseError, ContainerKind, ContainerStack},
    value::Value,
};

/// A reusable JSON decoder.
///
/// The decoder keeps a scratch buffer and container stack between calls so
/// their allocations can be reused; both are reset at the start of every
/// read, so a failed read never affects the next one.
///
/// # Examples
///
/// ```rust
/// use jsonread::{JsonDecoder, Value};
///
/// let mut decoder = JsonDecoder::new();
/// let value = decoder.read_str(r#"{"a":1,"b":[2,3]}"#).unwrap();
/// assert_eq!(value.get("a"), Some(&Value::Integer(1)));
/// assert_eq!(
///     value.get("b"),
///     Some(&Value::Array(vec![Value::Integer(2), Value::Integer(3)]))
/// );
/// ```
#[derive(Debug, Default)]
pub struct JsonDecoder {
    options: DecoderOptions,
    scratch: String,
    stack: ContainerStack,
}

impl JsonDecoder {
    /// Creates a decoder that keeps object keys in insertion order.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DecoderOptions::default())
    }

    /// Creates a decoder that sorts object keys.
    #[must_use]
    pub fn sorted() -> Self {
        Self::with_options(DecoderOptions { sort_keys: true })
    }

    /// Creates a decoder with explicit [`DecoderOptions`].
    #[must_use]
    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            options,
            scratch: String::new(),
            stack: ContainerStack::new(),
        }
    }

    /// The options this decoder was built with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes one document from `source`, consuming it to the end.
    ///
    /// Empty (or all-whitespace) input decodes to [`Value::Null`]. Content
    /// after a complete top-level value is not rejected: each further
    /// top-level value replaces the result, and separators between values
    /// are skipped.
    ///
    /// Nothing built during a read is dropped recursively, whether it is a
    /// replaced top-level value or partial work abandoned on error. The
    /// returned tree is an ordinary [`Value`]; call [`Value::dismantle`] to
    /// drop one nested deeper than the thread's stack allows.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] for malformed input, including input that ends
    /// inside a container, and [`Error::Io`] when the source fails.
    pub fn read<S: CharSource>(&mut self, source: S) -> Result<Value, Error> {
        self.stack.clear();
        let decoded = self.drive(source);
        if decoded.is_err() {
            self.stack.clear();
        }
        decoded
    }

    fn drive<S: CharSource>(&mut self, source: S) -> Result<Value, Error> {
        let sort_keys = self.options.sort_keys;
        let stack = &mut self.stack;
        let mut scanner = Scanner::new(source, &mut self.scratch)?;

        let mut result = Root::default();
        scanner.cursor.skip_whitespace()?;

        while let Some(c) = scanner.cursor.current() {
            match c {
                ']' | '}' => {
                    match stack.close(c, sort_keys) {
                        Ok(Some(root)) => result.set(root),
                        Ok(None) => {}
                        Err(CloseError::Empty | CloseError::Mismatch) => {
                            return Err(scanner.cursor.error(SyntaxError::UnmatchedClose(c)));
                        }
                    }
                    trace!("closed '{c}', depth {}", stack.depth());
                    scanner.cursor.advance()?;
                }
                ',' => {
                    scanner.cursor.advance()?;
                }
                _ => {
                    let mut key = match stack.top_kind() {
                        Some(ContainerKind::Object) => Some(read_key(&mut scanner)?),
                        Some(ContainerKind::Array) | None => None,
                    };
                    if let Some(value) = read_value(&mut scanner, stack, &mut key)? {
                        if stack.is_empty() {
                            result.set(value);
                        } else {
                            stack.append(key, value);
                        }
                    }
                }
            }

            scanner.cursor.skip_whitespace()?;
        }

        if !stack.is_empty() {
            return Err(scanner.cursor.error(SyntaxError::UnexpectedEndOfInput));
        }

        let value = result.take();
        debug!(
            "decoded {} value, max depth {}",
            value.kind(),
            stack.max_depth()
        );
        Ok(value)
    }

    /// Like [`read`](Self::read), but rejects an absent source up front.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSource`] when `source` is `None`; otherwise as for
    /// [`read`](Self::read).
    pub fn read_opt<S: CharSource>(&mut self, source: Option<S>) -> Result<Value, Error> {
        let source = source.ok_or(Error::MissingSource)?;
        self.read(source)
    }

    /// Decodes a document and converts the root to `T`.
    ///
    /// ```rust
    /// use jsonread::{JsonDecoder, StrSource};
    ///
    /// let mut decoder = JsonDecoder::new();
    /// let n: i64 = decoder.read_as(StrSource::new("12")).unwrap();
    /// assert_eq!(n, 12);
    /// assert!(decoder.read_as::<String, _>(StrSource::new("12")).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// As for [`read`](Self::read), plus [`Error::Type`] when the root is
    /// not a `T`.
    pub fn read_as<T, S>(&mut self, source: S) -> Result<T, Error>
    where
        T: TryFrom<Value, Error = TypeMismatch>,
        S: CharSource,
    {
        Ok(T::try_from(self.read(source)?)?)
    }

    /// Decodes a document held in memory.
    ///
    /// # Errors
    ///
    /// As for [`read`](Self::read).
    pub fn read_str(&mut self, text: &str) -> Result<Value, Error> {
        self.read(StrSource::new(text))
    }

    /// Decodes a UTF-8 byte stream.
    ///
    /// # Errors
    ///
    /// As for [`read`](Self::read); malformed UTF-8 is an [`Error::Io`] of
    /// kind [`InvalidData`](std::io::ErrorKind::InvalidData).
    pub fn read_reader<R: Read>(&mut self, reader: R) -> Result<Value, Error> {
        self.read(ReadSource::new(reader))
    }
}

/// The most recent complete top-level value. Whatever it still holds when
/// dropped, including on an error return, is torn down without recursing.
#[derive(Default)]
struct Root(Option<Value>);

impl Root {
    fn set(&mut self, value: Value) {
        if let Some(previous) = self.0.replace(value) {
            debug!("discarding earlier top-level {} value", previous.kind());
            previous.dismantle();
        }
    }

    fn take(&mut self) -> Value {
        self.0.take().unwrap_or_default()
    }
}

impl Drop for Root {
    fn drop(&mut self) {
        if let Some(value) = self.0.take() {
            value.dismantle();
        }
    }
}

/// Reads `"key"` `:` inside an object, leaving the cursor on the value.
fn read_key<S: CharSource>(scanner: &mut Scanner<'_, S>) -> Result<String, Error> {
    if scanner.cursor.current() != Some('"') {
        return Err(scanner.cursor.error(SyntaxError::InvalidKey));
    }
    let key = scanner.read_string()?;

    scanner.cursor.skip_whitespace()?;
    if scanner.cursor.current() != Some(':') {
        return Err(scanner.cursor.error(SyntaxError::MissingKeyDelimiter));
    }
    scanner.cursor.advance()?;
    scanner.cursor.skip_whitespace()?;
    Ok(key)
}

/// Dispatches on the cached character. Scalars are returned; `[` and `{`
/// push a container, taking `key` as its slot in the parent, and return
/// `None`.
fn read_value<S: CharSource>(
    scanner: &mut Scanner<'_, S>,
    stack: &mut ContainerStack,
    key: &mut Option<String>,
) -> Result<Option<Value>, Error> {
    let Some(c) = scanner.cursor.current() else {
        return Err(scanner.cursor.error(SyntaxError::UnexpectedEndOfInput));
    };

    let value = match c {
        '"' => Value::String(scanner.read_string()?),
        '[' => {
            stack.open_array(key.take());
            trace!("opened array, depth {}", stack.depth());
            scanner.cursor.advance()?;
            return Ok(None);
        }
        '{' => {
            stack.open_object(key.take());
            trace!("opened object, depth {}", stack.depth());
            scanner.cursor.advance()?;
            return Ok(None);
        }
        c if is_number_start(c) => scanner.read_number()?,
        c => {
            let Some(keyword) = Keyword::from_first(c) else {
                return Err(scanner.cursor.error(SyntaxError::UnexpectedCharacter(c)));
            };
            if !scanner.read_keyword(keyword)? {
                return Err(scanner.cursor.error(SyntaxError::InvalidKeyword(keyword.text())));
            }
            keyword.value()
        }
    };
    Ok(Some(value))
}

/// Decodes `text` with keys in insertion order.
///
/// ```rust
/// let value = jsonread::from_str("[1, 2.5, \"x\"]").unwrap();
/// assert_eq!(value.as_array().map(Vec::len), Some(3));
/// ```
///
/// # Errors
///
/// See [`JsonDecoder::read`].
pub fn from_str(text: &str) -> Result<Value, Error> {
    JsonDecoder::new().read_str(text)
}

/// Decodes `text` with keys sorted.
///
/// # Errors
///
/// See [`JsonDecoder::read`].
pub fn from_str_sorted(text: &str) -> Result<Value, Error> {
    JsonDecoder::sorted().read_str(text)
}

/// Decodes a UTF-8 byte stream with keys in insertion order.
///
/// # Errors
///
/// See [`JsonDecoder::read_reader`].
pub fn from_reader<R: Read>(reader: R) -> Result<Value, Error> {
    JsonDecoder::new().read_reader(reader)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn reuse_after_failure_starts_clean() {
        let mut decoder = JsonDecoder::new();
        assert!(decoder.read_str(r#"[[1, {"a": "unterminated"#).is_err());
        assert_eq!(decoder.read_str("2").unwrap(), Value::Integer(2));
        assert_eq!(decoder.read_str("[]").unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn key_slot_follows_nested_container() {
        let value = from_str(r#"{"outer": {"inner": [true]}, "after": null}"#).unwrap();
        let inner = value.get("outer").and_then(|v| v.get("inner"));
        assert_eq!(inner, Some(&Value::Array(vec![Value::Boolean(true)])));
        assert_eq!(value.get("after"), Some(&Value::Null));
    }

    #[test]
    fn end_of_input_after_key_is_reported() {
        let err = from_str(r#"{"a":"#).unwrap_err();
        assert_eq!(err.syntax_kind(), Some(&SyntaxError::UnexpectedEndOfInput));
    }

    #[test]
    fn error_position_points_at_offending_character() {
        let err = from_str("[1,\n  x]").unwrap_err();
        assert_eq!(err.syntax_kind(), Some(&SyntaxError::UnexpectedCharacter('x')));
        assert_eq!(err.position(), Some((2, 3)));
        assert_eq!(err.to_string(), "unexpected character 'x' at 2:3");
    }

    #[test]
    fn options_are_exposed() {
        assert!(!JsonDecoder::new().options().sort_keys);
        assert!(JsonDecoder::sorted().options().sort_keys);
    }
}
