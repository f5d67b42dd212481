//! Lexical readers for strings, numbers and keywords.
//!
//! Each reader is entered only once the cached character has been identified
//! as the start of its token, and returns with the cursor on the first
//! character after the token. Readers share one scratch buffer, owned by the
//! decoder so its allocation survives across reads.
use crate::{
    cursor::Cursor,
    error::{Error, SyntaxError},
    escape::{UnicodeEscape, combine_surrogates, is_high_surrogate, is_low_surrogate},
    source::CharSource,
    value::Value,
};

/// The three fixed literal tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    True,
    False,
    Null,
}

impl Keyword {
    /// The keyword starting with `first`, if any.
    pub(crate) fn from_first(first: char) -> Option<Self> {
        match first {
            't' => Some(Self::True),
            'f' => Some(Self::False),
            'n' => Some(Self::Null),
            _ => None,
        }
    }

    pub(crate) fn text(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
        }
    }

    pub(crate) fn value(self) -> Value {
        match self {
            Self::True => Value::Boolean(true),
            Self::False => Value::Boolean(false),
            Self::Null => Value::Null,
        }
    }
}

/// Characters accepted inside a numeric literal after its first character.
/// Validation is left to the final `parse`.
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+')
}

/// Characters that can start a numeric literal.
pub(crate) fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '+'
}

#[derive(Debug)]
pub(crate) struct Scanner<'a, S> {
    pub(crate) cursor: Cursor<S>,
    scratch: &'a mut String,
}

impl<'a, S: CharSource> Scanner<'a, S> {
    /// Starts scanning `source`, clearing whatever a previous read left in
    /// `scratch`.
    pub(crate) fn new(source: S, scratch: &'a mut String) -> Result<Self, Error> {
        scratch.clear();
        Ok(Self {
            cursor: Cursor::new(source)?,
            scratch,
        })
    }

    fn error(&self, kind: SyntaxError) -> Error {
        self.cursor.error(kind)
    }

    /// Reads a quoted string. The cached character must be the opening `"`.
    pub(crate) fn read_string(&mut self) -> Result<String, Error> {
        self.scratch.clear();
        self.cursor.advance()?;

        loop {
            let c = match self.cursor.current() {
                None => return Err(self.error(SyntaxError::UnterminatedString)),
                Some('"') => break,
                Some(c) => c,
            };

            if c.is_control() {
                return Err(self.error(SyntaxError::IllegalCharacter(c)));
            }

            let ch = if c == '\\' { self.read_escape()? } else { c };
            self.scratch.push(ch);
            self.cursor.advance()?;
        }

        self.cursor.advance()?;
        Ok(self.scratch.clone())
    }

    /// Decodes one escape sequence. Entered on the backslash; returns with
    /// the cursor on the last character of the sequence.
    fn read_escape(&mut self) -> Result<char, Error> {
        let ch = match self.cursor.advance()? {
            None => return Err(self.error(SyntaxError::UnterminatedEscape)),
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('r') => '\r',
            Some('n') => '\n',
            Some('t') => '\t',
            Some(c @ ('"' | '\\' | '/')) => c,
            Some('u') => return self.read_unicode_escape(),
            Some(c) => return Err(self.error(SyntaxError::InvalidEscape(c))),
        };
        Ok(ch)
    }

    /// Decodes the digits of a `\u` escape, pairing a high surrogate with
    /// the low surrogate escape that must follow it.
    fn read_unicode_escape(&mut self) -> Result<char, Error> {
        let unit = self.read_code_unit()?;

        if is_high_surrogate(unit) {
            let lone = SyntaxError::InvalidUnicodeEscapeSequence(u32::from(unit));
            if self.cursor.advance()? != Some('\\') || self.cursor.advance()? != Some('u') {
                return Err(self.error(lone));
            }
            let low = self.read_code_unit()?;
            if !is_low_surrogate(low) {
                return Err(self.error(lone));
            }
            return combine_surrogates(unit, low).map_err(|kind| self.error(kind));
        }

        char::from_u32(u32::from(unit))
            .ok_or_else(|| self.error(SyntaxError::InvalidUnicodeEscapeSequence(u32::from(unit))))
    }

    /// Consumes exactly four hex digits following the cached `u`.
    fn read_code_unit(&mut self) -> Result<u16, Error> {
        let mut esc = UnicodeEscape::new();
        loop {
            let Some(c) = self.cursor.advance()? else {
                return Err(self.error(SyntaxError::IncompleteUnicodeEscape));
            };
            if let Some(unit) = esc.feed(c).map_err(|kind| self.error(kind))? {
                return Ok(unit);
            }
        }
    }

    /// Reads a numeric literal. The cached character must be a digit, `+`
    /// or `-`.
    ///
    /// Literals containing `.`, `e` or `E` become [`Value::Double`]; others
    /// become [`Value::Integer`] when they fit in 32 bits and
    /// [`Value::Long`] otherwise.
    pub(crate) fn read_number(&mut self) -> Result<Value, Error> {
        self.scratch.clear();
        let mut decimal = false;

        while let Some(c) = self.cursor.current() {
            if !self.scratch.is_empty() && !is_number_char(c) {
                break;
            }
            decimal |= matches!(c, '.' | 'e' | 'E');
            self.scratch.push(c);
            self.cursor.advance()?;
        }

        let text = self.scratch.as_str();
        let invalid = || SyntaxError::InvalidNumber(text.to_owned());
        let value = if decimal {
            text.parse::<f64>().map(Value::Double).map_err(|_| invalid())
        } else {
            text.parse::<i64>().map(Value::from).map_err(|_| invalid())
        };
        value.map_err(|kind| self.error(kind))
    }

    /// Matches `keyword` one character at a time. Returns `false` on the
    /// first mismatch; characters already matched stay consumed.
    pub(crate) fn read_keyword(&mut self, keyword: Keyword) -> Result<bool, Error> {
        for expected in keyword.text().chars() {
            if self.cursor.current() != Some(expected) {
                return Ok(false);
            }
            self.cursor.advance()?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::source::StrSource;

    fn scan<T>(
        input: &str,
        f: impl FnOnce(&mut Scanner<'_, StrSource<'_>>) -> Result<T, Error>,
    ) -> (Result<T, Error>, Option<char>) {
        let mut scratch = String::new();
        let mut scanner = Scanner::new(StrSource::new(input), &mut scratch).unwrap();
        let out = f(&mut scanner);
        (out, scanner.cursor.current())
    }

    fn kind<T: core::fmt::Debug>(res: Result<T, Error>) -> SyntaxError {
        res.unwrap_err().syntax_kind().cloned().expect("syntax error")
    }

    #[rstest]
    #[case(r#""""#, "")]
    #[case(r#""abc""#, "abc")]
    #[case(r#""a\"b""#, "a\"b")]
    #[case(r#""\b\f\r\n\t\/\\""#, "\u{8}\u{c}\r\n\t/\\")]
    #[case(r#""\u0041\u00e9""#, "A\u{e9}")]
    #[case(r#""\uD83D\uDE00""#, "\u{1F600}")]
    #[case("\"caf\u{e9} \u{1F600}\"", "caf\u{e9} \u{1F600}")]
    fn reads_strings(#[case] input: &str, #[case] expected: &str) {
        let (out, rest) = scan(input, |s| s.read_string());
        assert_eq!(out.unwrap(), expected);
        assert_eq!(rest, None);
    }

    #[test]
    fn string_leaves_cursor_after_closing_quote() {
        let (out, rest) = scan(r#""ab" :"#, |s| s.read_string());
        assert_eq!(out.unwrap(), "ab");
        assert_eq!(rest, Some(' '));
    }

    #[rstest]
    #[case(r#""abc"#, SyntaxError::UnterminatedString)]
    #[case("\"a\u{1}b\"", SyntaxError::IllegalCharacter('\u{1}'))]
    #[case("\"a\nb\"", SyntaxError::IllegalCharacter('\n'))]
    #[case("\"a\u{85}b\"", SyntaxError::IllegalCharacter('\u{85}'))]
    #[case(r#""\"#, SyntaxError::UnterminatedEscape)]
    #[case(r#""\x""#, SyntaxError::InvalidEscape('x'))]
    #[case(r#""\u12"#, SyntaxError::IncompleteUnicodeEscape)]
    #[case(r#""\u12G4""#, SyntaxError::InvalidUnicodeEscapeChar('G'))]
    #[case(r#""\uD800""#, SyntaxError::InvalidUnicodeEscapeSequence(0xD800))]
    #[case(r#""\uD800A""#, SyntaxError::InvalidUnicodeEscapeSequence(0xD800))]
    #[case(r#""\uDC00""#, SyntaxError::InvalidUnicodeEscapeSequence(0xDC00))]
    fn rejects_bad_strings(#[case] input: &str, #[case] expected: SyntaxError) {
        let (out, _) = scan(input, |s| s.read_string());
        assert_eq!(kind(out), expected);
    }

    #[rstest]
    #[case("0", Value::Integer(0))]
    #[case("-17", Value::Integer(-17))]
    #[case("+5", Value::Integer(5))]
    #[case("2147483647", Value::Integer(i32::MAX))]
    #[case("-2147483648", Value::Integer(i32::MIN))]
    #[case("2147483648", Value::Long(2_147_483_648))]
    #[case("-2147483649", Value::Long(-2_147_483_649))]
    #[case("9223372036854775807", Value::Long(i64::MAX))]
    #[case("1.0", Value::Double(1.0))]
    #[case("-0.5", Value::Double(-0.5))]
    #[case("1e3", Value::Double(1000.0))]
    #[case("2E-2", Value::Double(0.02))]
    #[case("1.5e+2", Value::Double(150.0))]
    fn reads_numbers(#[case] input: &str, #[case] expected: Value) {
        let (out, rest) = scan(input, |s| s.read_number());
        assert_eq!(out.unwrap(), expected);
        assert_eq!(rest, None);
    }

    #[test]
    fn number_stops_at_delimiter() {
        let (out, rest) = scan("42,", |s| s.read_number());
        assert_eq!(out.unwrap(), Value::Integer(42));
        assert_eq!(rest, Some(','));
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("1-2")]
    #[case("1+2")]
    #[case("-")]
    #[case("1e")]
    #[case("9223372036854775808")]
    fn malformed_numbers_fail_at_parse(#[case] input: &str) {
        let (out, _) = scan(input, |s| s.read_number());
        assert_eq!(kind(out), SyntaxError::InvalidNumber(input.to_owned()));
    }

    #[rstest]
    #[case("true", Keyword::True, true, None)]
    #[case("false]", Keyword::False, true, Some(']'))]
    #[case("null", Keyword::Null, true, None)]
    #[case("tru", Keyword::True, false, None)]
    #[case("nul1", Keyword::Null, false, Some('1'))]
    #[case("fxlse", Keyword::False, false, Some('x'))]
    fn matches_keywords(
        #[case] input: &str,
        #[case] keyword: Keyword,
        #[case] matched: bool,
        #[case] rest: Option<char>,
    ) {
        let (out, after) = scan(input, |s| s.read_keyword(keyword));
        assert_eq!(out.unwrap(), matched);
        assert_eq!(after, rest);
    }

    #[test]
    fn keyword_lookup_by_first_letter() {
        assert_eq!(Keyword::from_first('t'), Some(Keyword::True));
        assert_eq!(Keyword::from_first('f'), Some(Keyword::False));
        assert_eq!(Keyword::from_first('n'), Some(Keyword::Null));
        assert_eq!(Keyword::from_first('x'), None);
        assert_eq!(Keyword::Null.value(), Value::Null);
    }
}
