//! Canonical byte encoding used as the signing input.
//!
//! The encoding is bencode over JSON values:
//!
//! - integers encode as `i<decimal>e`
//! - strings encode as `<byte length>:<utf-8 bytes>`
//! - arrays encode as `l<items>e`, preserving element order
//! - objects encode as `d<key><value>...e` with keys sorted by their raw bytes
//! - floats encode as `f<shortest round-trip decimal>e`, so `1.0` never
//!   collides with the integer `1`
//! - booleans encode as the integers `1` and `0`, `null` as the empty string
//!
//! Only non-finite numbers are rejected.

use serde_json::{Map, Value};

use crate::error::Error;

/// Encode a JSON value to its canonical bytes.
pub fn canonicalize(value: &Value) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Encode a JSON object to its canonical bytes.
pub fn canonicalize_object(map: &Map<String, Value>) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    encode_map_to(&mut buf, map)?;
    Ok(buf)
}

/// Canonical form as a string. Every canonical encoding is valid UTF-8.
pub fn canonical_string(value: &Value) -> Result<String, Error> {
    String::from_utf8(canonicalize(value)?).map_err(|e| Error::Encoding(e.to_string()))
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), Error> {
    match value {
        Value::Null => encode_bytes(buf, b""),
        Value::Bool(b) => encode_number(buf, b'i', if *b { "1" } else { "0" }),
        Value::Number(n) => {
            match n.as_f64().filter(|_| n.is_f64()) {
                Some(f) if !f.is_finite() => {
                    return Err(Error::Encoding(format!(
                        "non-finite number {} has no canonical form",
                        f
                    )))
                }
                Some(_) => encode_number(buf, b'f', &n.to_string()),
                None => encode_number(buf, b'i', &n.to_string()),
            }
        }
        Value::String(s) => encode_bytes(buf, s.as_bytes()),
        Value::Array(items) => {
            buf.push(b'l');
            for item in items {
                encode_value_to(buf, item)?;
            }
            buf.push(b'e');
        }
        Value::Object(map) => encode_map_to(buf, map)?,
    }
    Ok(())
}

fn encode_map_to(buf: &mut Vec<u8>, map: &Map<String, Value>) -> Result<(), Error> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    buf.push(b'd');
    for (key, value) in entries {
        encode_bytes(buf, key.as_bytes());
        encode_value_to(buf, value)?;
    }
    buf.push(b'e');
    Ok(())
}

fn encode_number(buf: &mut Vec<u8>, tag: u8, decimal: &str) {
    buf.push(tag);
    buf.extend_from_slice(decimal.as_bytes());
    buf.push(b'e');
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(bytes.len().to_string().as_bytes());
    buf.push(b':');
    buf.extend_from_slice(bytes);
}
