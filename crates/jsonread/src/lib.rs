//! A single-pass JSON decoder built around one character of lookahead.
//!
//! Text is pulled from a [`CharSource`] one character at a time and decoded
//! into a [`Value`] tree. Containers are tracked on an explicit stack rather
//! than by recursion, so deeply nested documents cannot exhaust the call
//! stack while decoding.
//!
//! ```rust
//! use jsonread::{JsonDecoder, Value};
//!
//! let mut decoder = JsonDecoder::new();
//! let value = decoder.read_str(r#"{"small": 1, "big": 5000000000, "real": 1.0}"#).unwrap();
//! assert_eq!(value.get("small"), Some(&Value::Integer(1)));
//! assert_eq!(value.get("big"), Some(&Value::Long(5_000_000_000)));
//! assert_eq!(value.get("real"), Some(&Value::Double(1.0)));
//! ```
//!
//! ## Compatibility
//!
//! The accepted grammar is RFC 8259 with a few deliberate relaxations:
//!
//! - numbers may start with `+`, and numeric text is only validated when it
//!   is converted, so `1.2.3` fails as an invalid number rather than as an
//!   unexpected character;
//! - a number runs on through any digit, `.`, `e`, `E`, `-` or `+`, so `1+2`
//!   is read as the single literal `1+2` and fails as an invalid number;
//! - a literal containing `e` or `E` decodes to a [`Value::Double`] even
//!   without a `.`, so `1e3` is `1000.0`;
//! - separators are not checked, so `[1,]` decodes to `[1]` and `[1 2]` to
//!   `[1, 2]`;
//! - content after the first top-level value is decoded too, and the last
//!   top-level value is returned.
//!
//! Unpaired surrogate escapes such as `"\uD800"` are rejected, since they do
//! not encode a Unicode scalar value.
//!
//! Decoding never recurses, but dropping a [`Value`] does, once per level of
//! nesting. Use [`Value::dismantle`] for trees nested deeply enough to
//! matter.

#![allow(missing_docs)]

mod cursor;
mod decoder;
mod error;
mod escape;
mod options;
mod scanner;
mod source;
mod stack;
mod value;

#[cfg(test)]
mod tests;

pub use decoder::{JsonDecoder, from_reader, from_str, from_str_sorted};
pub use error::{Error, SyntaxError, TypeMismatch};
pub use options::DecoderOptions;
pub use source::{CharSource, IterSource, ReadSource, StrSource};
pub use value::{Array, Map, Value};
