#![no_main]
use std::cell::RefCell;
use std::io::{self, Read};

use arbitrary::Arbitrary;
use jsonread::{DecoderOptions, JsonDecoder, Map, Value};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    "\u{85}".as_bytes(),
    "\u{a0}".as_bytes(),
    "\u{1680}".as_bytes(),
    "\u{2000}".as_bytes(),
    "\u{2003}".as_bytes(),
    "\u{200A}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{2029}".as_bytes(),
    "\u{202F}".as_bytes(),
    "\u{205F}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let limit = max_size - HEADER;
        let mut len = HEADER;
        len += append_whitespace(&mut data[len..], limit);
        len += append_value(&mut data[len..], size, max_size - len);
        len += append_whitespace(&mut data[len..], max_size - len);
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight whitespace code points without exceeding `limit`
/// bytes. Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let n_codepoints = rng.random_range(1..=limit.min(8));
        let mut written = 0;

        for _ in 0..n_codepoints {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(serde_json::Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        use serde_json::Value as J;

        let value = match u.choose_index(23)? {
            0 => J::Null,
            1 => J::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                J::Number(serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?)
            }
            3 | 4 => J::Number(u.arbitrary::<i64>()?.into()),
            5..=12 => J::String(u.arbitrary()?),
            13..=17 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                J::Array(elems.into_iter().map(|v| v.0).collect())
            }
            18..=22 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                J::Object(m.into_iter().map(|(k, v)| (k, v.0)).collect())
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Converts a `serde_json` value into the shape `jsonread` decodes to.
fn expected(v: &serde_json::Value, sort_keys: bool) -> Value {
    use serde_json::Value as J;

    match v {
        J::Null => Value::Null,
        J::Bool(b) => Value::Boolean(*b),
        J::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        J::String(s) => Value::String(s.clone()),
        J::Array(items) => Value::Array(items.iter().map(|v| expected(v, sort_keys)).collect()),
        J::Object(map) => {
            let mut out: Map = map
                .iter()
                .map(|(k, v)| (k.clone(), expected(v, sort_keys)))
                .collect();
            if sort_keys {
                out.sort_keys();
            }
            Value::Object(out)
        }
    }
}

/// Keys compared in order, which `Value`'s equality ignores.
fn same_order(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| same_order(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|((ka, va), (kb, vb))| ka == kb && same_order(va, vb))
        }
        // serde_json does not parse floats with correct rounding by default.
        (Value::Double(x), Value::Double(y)) => (x - y).abs() <= f64::EPSILON * x.abs().max(y.abs()),
        // serde_json reads `-0` as a float.
        (Value::Integer(0), Value::Double(z)) | (Value::Double(z), Value::Integer(0)) => *z == 0.0,
        _ => a == b,
    }
}

/// Hands the input out in pieces whose sizes come from `seed`, splitting
/// multi-byte characters across reads.
struct Chunked<'a> {
    data: &'a [u8],
    seed: u64,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Ok(0);
        }
        self.seed = self.seed.rotate_left(7) ^ 0x9e37_79b9;
        let n = ((self.seed as usize % 7) + 1).min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn decode(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let data = &data[HEADER..];

    let sort_keys = flags & 1 != 0;
    let mut decoder = JsonDecoder::with_options(DecoderOptions { sort_keys });

    let from_bytes = decoder.read_reader(Chunked { data, seed });
    let Ok(text) = std::str::from_utf8(data) else {
        assert!(from_bytes.is_err(), "invalid UTF-8 decoded: {from_bytes:?}");
        return;
    };
    let from_text = decoder.read_str(text);

    match (&from_bytes, &from_text) {
        (Ok(a), Ok(b)) => assert!(same_order(a, b), "reader {a:?} != str {b:?}"),
        (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
        _ => panic!("reader {from_bytes:?} disagrees with str {from_text:?}"),
    }

    // Whitespace here is Unicode White_Space, which serde_json does not skip,
    // so only documents it accepts are compared.
    // DEL and the C1 controls are rejected inside strings here but accepted
    // by serde_json.
    if text.chars().any(|c| ('\u{7f}'..='\u{9f}').contains(&c)) {
        return;
    }
    let Ok(reference) = serde_json::from_str::<serde_json::Value>(text) else {
        return;
    };
    if !integers_fit(&reference) {
        return;
    }
    match from_text {
        Ok(value) => {
            let want = expected(&reference, sort_keys);
            assert!(same_order(&value, &want), "{value:?} != {want:?}");
        }
        Err(err) => panic!("serde_json accepted {text:?}, jsonread did not: {err}"),
    }
}

/// Integers above `i64::MAX` are rejected here; serde_json keeps them as
/// `u64`.
fn integers_fit(v: &serde_json::Value) -> bool {
    use serde_json::Value as J;

    match v {
        J::Number(n) => !n.is_u64() || n.as_i64().is_some(),
        J::Array(items) => items.iter().all(integers_fit),
        J::Object(map) => map.values().all(integers_fit),
        _ => true,
    }
}

fuzz_target!(|data: &[u8]| decode(data));
