use super::error::BencodeError;
use crate::bencode::bvalue::{BDict, BValue};

/// Lists and dictionaries nested deeper than this are rejected.
pub const MAX_DEPTH: usize = 512;

/// Decodes one bencoded value from the start of `input`.
///
/// Returns the number of bytes consumed together with the value. Bytes after
/// the value are left untouched; use [`decode_exact`] to reject them.
pub fn decode_bencode(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
    decode_at(input, 0, 0)
}

/// Like [`decode_bencode`], but the value must span the whole input.
pub fn decode_exact(input: &[u8]) -> Result<BValue, BencodeError> {
    let (consumed, value) = decode_bencode(input)?;
    if consumed != input.len() {
        return Err(BencodeError::TrailingData { offset: consumed });
    }
    Ok(value)
}

// Positions passed around below are absolute offsets into `input`, and each
// helper returns the offset just past the value it decoded.
fn decode_at(input: &[u8], pos: usize, depth: usize) -> Result<(usize, BValue), BencodeError> {
    match input.get(pos) {
        None => Err(BencodeError::UnexpectedEnd { offset: pos }),
        Some(b'i') => decode_integer(input, pos),
        Some(b'l') => decode_list(input, pos, depth),
        Some(b'd') => decode_dict(input, pos, depth),
        Some(c) if c.is_ascii_digit() => decode_string(input, pos),
        Some(&byte) => Err(BencodeError::UnexpectedByte { offset: pos, byte }),
    }
}

/// Decodes an integer of the form `i<digits>e`.
fn decode_integer(input: &[u8], pos: usize) -> Result<(usize, BValue), BencodeError> {
    let start = pos + 1; // skip 'i'
    let end = input[start..]
        .iter()
        .position(|&b| b == b'e')
        .map(|i| start + i)
        .ok_or(BencodeError::UnexpectedEnd { offset: input.len() })?;

    let raw = &input[start..end];
    let invalid = |offset: usize, reason: &str| BencodeError::InvalidInteger {
        offset,
        reason: reason.to_string(),
    };

    let (negative, digits_start) = match raw.first() {
        Some(b'-') => (true, start + 1),
        Some(_) => (false, start),
        None => return Err(invalid(start, "no digits")),
    };
    let digits = &input[digits_start..end];

    if digits.is_empty() {
        return Err(invalid(digits_start, "no digits after '-'"));
    }
    if let Some(i) = digits.iter().position(|b| !b.is_ascii_digit()) {
        return Err(invalid(digits_start + i, "non-digit character"));
    }
    // Leading zeros not allowed, and "-0" is not a valid integer
    if digits[0] == b'0' && digits.len() > 1 {
        return Err(invalid(digits_start, "leading zeros are not allowed"));
    }
    if negative && digits == b"0" {
        return Err(invalid(start, "negative zero is not allowed"));
    }

    // Only ASCII digits and an optional '-' remain, so this is valid UTF-8
    let num_str = std::str::from_utf8(raw).map_err(|_| invalid(start, "non-UTF-8 data"))?;
    let parsed = num_str
        .parse::<i64>()
        .map_err(|e| BencodeError::InvalidInteger {
            offset: start,
            reason: format!("{} ({})", e, num_str),
        })?;

    // add 1 to account for 'e'
    Ok((end + 1, BValue::Integer(parsed)))
}

/// Decodes a byte string of the form `<length>:<bytes>`.
fn decode_string(input: &[u8], pos: usize) -> Result<(usize, BValue), BencodeError> {
    let (end, data) = read_string(input, pos)?;
    Ok((end, BValue::ByteString(data.to_vec())))
}

fn read_string(input: &[u8], pos: usize) -> Result<(usize, &[u8]), BencodeError> {
    let colon = input[pos..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map(|i| pos + i)
        .ok_or(BencodeError::UnexpectedEnd { offset: input.len() })?;

    if input[colon] != b':' {
        return Err(BencodeError::InvalidLength {
            offset: colon,
            reason: format!("expected ':' but found 0x{:02x}", input[colon]),
        });
    }

    let len_digits = &input[pos..colon];
    if len_digits.len() > 1 && len_digits[0] == b'0' {
        return Err(BencodeError::InvalidLength {
            offset: pos,
            reason: "leading zeros are not allowed".to_string(),
        });
    }

    let invalid_length = |reason: String| BencodeError::InvalidLength { offset: pos, reason };
    let length = std::str::from_utf8(len_digits)
        .map_err(|e| invalid_length(e.to_string()))?
        .parse::<usize>()
        .map_err(|e| invalid_length(e.to_string()))?;

    let start_data = colon + 1;
    let end_data = start_data
        .checked_add(length)
        .ok_or_else(|| invalid_length(format!("length {} overflows", length)))?;

    if end_data > input.len() {
        return Err(BencodeError::UnexpectedEnd { offset: input.len() });
    }

    Ok((end_data, &input[start_data..end_data]))
}

/// Decodes a list of the form `l<items>e`.
fn decode_list(input: &[u8], pos: usize, depth: usize) -> Result<(usize, BValue), BencodeError> {
    check_depth(pos, depth)?;

    let mut idx = pos + 1; // skip 'l'
    let mut items = Vec::new();

    loop {
        match input.get(idx) {
            None => return Err(BencodeError::UnexpectedEnd { offset: idx }),
            Some(b'e') => break,
            Some(_) => {
                let (next, value) = decode_at(input, idx, depth + 1)?;
                idx = next;
                items.push(value);
            }
        }
    }

    Ok((idx + 1, BValue::List(items)))
}

/// Decodes a dictionary of the form `d(<key><value>)*e`.
fn decode_dict(input: &[u8], pos: usize, depth: usize) -> Result<(usize, BValue), BencodeError> {
    check_depth(pos, depth)?;

    let mut idx = pos + 1; // skip 'd'
    let mut dict = BDict::new();

    loop {
        // Dictionary keys must be byte strings
        let key = match input.get(idx) {
            None => return Err(BencodeError::UnexpectedEnd { offset: idx }),
            Some(b'e') => break,
            Some(c) if c.is_ascii_digit() => {
                let (next, key) = read_string(input, idx)?;
                idx = next;
                key
            }
            Some(_) => return Err(BencodeError::InvalidKey { offset: idx }),
        };

        let (next, value) = decode_at(input, idx, depth + 1)?;
        idx = next;
        dict.insert(key, value);
    }

    Ok((idx + 1, BValue::Dict(dict)))
}

fn check_depth(pos: usize, depth: usize) -> Result<(), BencodeError> {
    if depth >= MAX_DEPTH {
        return Err(BencodeError::NestingTooDeep {
            offset: pos,
            limit: MAX_DEPTH,
        });
    }
    Ok(())
}
