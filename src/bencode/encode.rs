use serde_json::{json, Value};

use super::{BDict, BValue};

/// Encode a `BValue` back into a bencoded `Vec<u8>`.
///
/// Dictionaries are written in their stored order, so re-encoding a decoded
/// value reproduces the original bytes.
pub fn encode_bvalue(value: &BValue) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    encode_into(value, &mut out);
    out
}

/// Encode a dictionary without wrapping it in a `BValue`.
pub fn encode_bdict(dict: &BDict) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    encode_dict(dict, &mut out);
    out
}

fn encode_into(value: &BValue, out: &mut Vec<u8>) {
    match value {
        BValue::Integer(i) => {
            out.push(b'i');
            out.extend_from_slice(i.to_string().as_bytes());
            out.push(b'e');
        }
        BValue::ByteString(bytes) => encode_bytes(bytes, out),
        BValue::List(items) => {
            out.push(b'l');
            for item in items {
                encode_into(item, out);
            }
            out.push(b'e');
        }
        BValue::Dict(dict) => encode_dict(dict, out),
    }
}

fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}

fn encode_dict(dict: &BDict, out: &mut Vec<u8>) {
    out.push(b'd');
    for (key, value) in dict.iter() {
        encode_bytes(key, out);
        encode_into(value, out);
    }
    out.push(b'e');
}

/// Convert a `BValue` into JSON.
///
/// - `Integer(i)` => JSON number
/// - `ByteString(bytes)` => string if UTF-8, otherwise `{"_bytes_hex": "..."}`
/// - `List(...)` => JSON array
/// - `Dict(...)` => JSON object, keys decoded lossily
pub fn bvalue_to_json(bv: &BValue) -> Value {
    match bv {
        BValue::Integer(i) => json!(i),
        BValue::ByteString(bytes) => match std::str::from_utf8(bytes) {
            Ok(utf8_str) => Value::String(utf8_str.to_string()),
            Err(_) => json!({ "_bytes_hex": hex::encode(bytes) }),
        },
        BValue::List(list_items) => Value::Array(list_items.iter().map(bvalue_to_json).collect()),
        BValue::Dict(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map.iter() {
                json_map.insert(String::from_utf8_lossy(k).into_owned(), bvalue_to_json(v));
            }
            Value::Object(json_map)
        }
    }
}
