/// Configuration options for [`JsonDecoder`](crate::JsonDecoder).
///
/// # Examples
///
/// ```rust
/// use jsonread::{DecoderOptions, JsonDecoder};
///
/// let mut decoder = JsonDecoder::with_options(DecoderOptions {
///     sort_keys: true,
///     ..Default::default()
/// });
/// let value = decoder.read_str(r#"{"b":1,"a":2}"#).unwrap();
/// let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
/// assert_eq!(keys, ["a", "b"]);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Whether object entries are ordered by key rather than by encounter.
    ///
    /// Keys compare by their UTF-8 bytes, which is Unicode code point order.
    /// Duplicate keys keep the last value in either mode; in insertion order
    /// they keep the position of their first occurrence.
    ///
    /// # Default
    ///
    /// `false`
    pub sort_keys: bool,
}
