//! Test-only JSON rendering, used to feed generated values back through the
//! decoder.
use core::fmt::Write;

use crate::{Map, Value};

/// Escapes quotes, backslashes and every control character so the decoder,
/// which rejects raw control characters, accepts the result.
pub(crate) fn write_escaped_string<W: Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Renders `value` as JSON. With `indent`, containers are laid out one entry
/// per line using that string for each nesting level.
pub(crate) fn render(value: &Value, indent: Option<&str>) -> String {
    let mut out = String::new();
    write_value(value, indent, 0, &mut out).expect("writing to a String");
    out
}

fn newline<W: Write>(indent: Option<&str>, level: usize, f: &mut W) -> core::fmt::Result {
    if let Some(unit) = indent {
        f.write_char('\n')?;
        for _ in 0..level {
            f.write_str(unit)?;
        }
    }
    Ok(())
}

fn write_value<W: Write>(
    value: &Value,
    indent: Option<&str>,
    level: usize,
    f: &mut W,
) -> core::fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Boolean(b) => write!(f, "{b}"),
        Value::Integer(n) => write!(f, "{n}"),
        Value::Long(n) => write!(f, "{n}"),
        // Debug output always carries a '.' or an exponent
        Value::Double(n) => write!(f, "{n:?}"),
        Value::String(s) => {
            f.write_char('"')?;
            write_escaped_string(s, f)?;
            f.write_char('"')
        }
        Value::Array(items) => {
            f.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                newline(indent, level + 1, f)?;
                write_value(item, indent, level + 1, f)?;
            }
            if !items.is_empty() {
                newline(indent, level, f)?;
            }
            f.write_char(']')
        }
        Value::Object(map) => {
            f.write_char('{')?;
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                newline(indent, level + 1, f)?;
                f.write_char('"')?;
                write_escaped_string(k, f)?;
                f.write_str(if indent.is_some() { "\": " } else { "\":" })?;
                write_value(v, indent, level + 1, f)?;
            }
            if !map.is_empty() {
                newline(indent, level, f)?;
            }
            f.write_char('}')
        }
    }
}

/// Structural equality that, unlike `==` on [`Map`], also requires object
/// entries to appear in the same order.
pub(crate) fn same_order(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_order(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .zip(y)
                    .all(|((kx, vx), (ky, vy))| kx == ky && same_order(vx, vy))
        }
        _ => a == b,
    }
}

/// Returns `true` if every object in `value` iterates in key order.
pub(crate) fn keys_sorted(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(keys_sorted),
        Value::Object(map) => {
            map.keys().zip(map.keys().skip(1)).all(|(a, b)| a < b)
                && map.values().all(keys_sorted)
        }
        _ => true,
    }
}

/// Returns a copy of `value` with every object's keys sorted.
pub(crate) fn sorted_copy(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sorted_copy).collect()),
        Value::Object(map) => {
            let mut out: Map = map.iter().map(|(k, v)| (k.clone(), sorted_copy(v))).collect();
            out.sort_keys();
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Builds an object from `(key, value)` pairs, preserving their order.
pub(crate) fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Object(entries.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}
