//! Decoded JSON values.
//!
//! This module defines the [`Value`] enum produced by
//! [`JsonDecoder`](crate::JsonDecoder), along with accessors and conversions
//! for pulling typed data back out of a decoded tree.
use indexmap::IndexMap;

use crate::error::TypeMismatch;

/// Object storage. Iteration follows insertion order, or key order when the
/// decoder was built with [`DecoderOptions::sort_keys`](crate::DecoderOptions).
///
/// Note that `IndexMap` equality ignores entry order; compare
/// `map.keys()` when order matters.
pub type Map = IndexMap<String, Value>;
/// Array storage.
pub type Array = Vec<Value>;

/// A JSON value as decoded from text.
///
/// Integer literals are narrowed: a literal that fits in an `i32` decodes to
/// [`Integer`](Value::Integer), a larger one to [`Long`](Value::Long). Any
/// literal containing `.`, `e` or `E` decodes to [`Double`](Value::Double).
///
/// # Examples
///
/// ```
/// use jsonread::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::from("value"));
/// let v = Value::Object(map);
/// assert_eq!(v.get("key").and_then(Value::as_str), Some("value"));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    Array(Array),
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Value {
    /// Narrows to [`Value::Integer`] when `v` fits, as the decoder does.
    fn from(v: i64) -> Self {
        match i32::try_from(v) {
            Ok(n) => Self::Integer(n),
            Err(_) => Self::Long(v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// A short name for the variant, used in type mismatch errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonread::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub fn is_i32(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Long`].
    ///
    /// [`Long`]: Value::Long
    #[must_use]
    pub fn is_i64(&self) -> bool {
        matches!(self, Self::Long(..))
    }

    /// Returns `true` if the value is [`Double`].
    ///
    /// [`Double`]: Value::Double
    #[must_use]
    pub fn is_f64(&self) -> bool {
        matches!(self, Self::Double(..))
    }

    /// Returns `true` for any of the three numeric variants.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonread::Value;
    ///
    /// assert!(Value::Integer(1).is_number());
    /// assert!(Value::Long(1 << 40).is_number());
    /// assert!(Value::Double(0.5).is_number());
    /// assert!(!Value::String("1".into()).is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Long(..) | Self::Double(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the integer value, widening [`Value::Integer`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(i64::from(*n)),
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value as a float, converting integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonread::Value;
    ///
    /// assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::Double(2.5).as_f64(), Some(2.5));
    /// assert_eq!(Value::Null.as_f64(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(f64::from(*n)),
            Self::Long(n) => Some(*n as f64),
            Self::Double(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` if this value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }

    /// Drops the tree without recursing.
    ///
    /// Dropping a `Value` normally recurses once per nesting level, so a
    /// tree nested tens of thousands of levels deep can overflow the stack
    /// when it goes out of scope. This tears it down from a heap work list
    /// instead.
    ///
    /// ```rust
    /// let depth = 100_000;
    /// let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    /// jsonread::from_str(&text).unwrap().dismantle();
    /// ```
    pub fn dismantle(self) {
        let mut pending = vec![self];
        while let Some(value) = pending.pop() {
            match value {
                Self::Array(items) => pending.extend(items.into_iter().filter(Self::is_container)),
                Self::Object(map) => pending.extend(map.into_values().filter(Self::is_container)),
                _ => {}
            }
        }
    }

    fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    fn mismatch(&self, expected: &'static str) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Builds the mismatch error and tears `self` down without recursing.
    fn reject(self, expected: &'static str) -> TypeMismatch {
        let err = self.mismatch(expected);
        self.dismantle();
        err
    }
}

impl TryFrom<Value> for bool {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value.as_bool() {
            Some(v) => Ok(v),
            None => Err(value.reject("boolean")),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value.as_i32() {
            Some(v) => Ok(v),
            None => Err(value.reject("integer")),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value.as_i64() {
            Some(v) => Ok(v),
            None => Err(value.reject("long")),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value.as_f64() {
            Some(v) => Ok(v),
            None => Err(value.reject("double")),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other.reject("string")),
        }
    }
}

impl TryFrom<Value> for Array {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(a) => Ok(a),
            other => Err(other.reject("array")),
        }
    }
}

impl TryFrom<Value> for Map {
    type Error = TypeMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(m) => Ok(m),
            other => Err(other.reject("object")),
        }
    }
}
