//! Accumulator for the four hex digits of a `\uXXXX` escape, plus the
//! surrogate-pair arithmetic needed to turn UTF-16 code units back into
//! scalar values.

use crate::error::SyntaxError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscape {
    acc: u32,
    len: u8,
}

impl UnicodeEscape {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn hex_val(c: char) -> Option<u32> {
        c.to_digit(16)
    }

    /// Feeds one hex digit. Returns `Ok(Some(unit))` with the UTF-16 code
    /// unit once the fourth digit arrives, after which the accumulator is
    /// empty again.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        let d = Self::hex_val(c).ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.acc = 0;
        self.len = 0;
        // four hex digits never exceed 0xFFFF
        Ok(u16::try_from(unit).ok())
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combines a high/low surrogate pair into the scalar value it encodes.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Result<char, SyntaxError> {
    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code).ok_or(SyntaxError::InvalidUnicodeEscapeSequence(code))
}
