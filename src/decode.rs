//! Percent-decoding with `decodeURI` semantics.
//!
//! Rules:
//! - `%XX` escapes decode to bytes; escapes above 0x7F must together form
//!   one valid UTF-8 character
//! - a `%` not followed by two hex digits is an error
//! - escapes that decode to a reserved character (`; / ? : @ & = + $ , #`)
//!   are kept as-is so the URL structure does not change
//! - all other text passes through untouched

use crate::error::DecodeError;

/// Characters `decodeURI` refuses to unescape.
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Decode a URI string the way `decodeURI` does.
pub fn decode_uri(text: &str) -> Result<String, DecodeError> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    // Start of the run of literal text not yet copied into `out`.
    let mut literal_start = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        out.push_str(&text[literal_start..i]);
        let start = i;
        let lead = hex_byte(bytes, i).ok_or(DecodeError::MalformedEscape { offset: i })?;
        i += 3;

        if lead < 0x80 {
            if RESERVED.contains(&lead) {
                out.push_str(&text[start..i]);
            } else {
                out.push(lead as char);
            }
            literal_start = i;
            continue;
        }

        let width = utf8_width(lead).ok_or(DecodeError::InvalidUtf8 { offset: start })?;
        let mut sequence = [lead, 0, 0, 0];
        for slot in sequence.iter_mut().take(width).skip(1) {
            if bytes.get(i) != Some(&b'%') {
                return Err(DecodeError::InvalidUtf8 { offset: start });
            }
            let byte = hex_byte(bytes, i).ok_or(DecodeError::MalformedEscape { offset: i })?;
            if byte & 0xC0 != 0x80 {
                return Err(DecodeError::InvalidUtf8 { offset: start });
            }
            *slot = byte;
            i += 3;
        }

        // from_utf8 rejects overlong forms and surrogates.
        let decoded = std::str::from_utf8(&sequence[..width])
            .map_err(|_| DecodeError::InvalidUtf8 { offset: start })?;
        out.push_str(decoded);
        literal_start = i;
    }

    out.push_str(&text[literal_start..]);
    Ok(out)
}

/// Read the two hex digits following the `%` at `pos`.
fn hex_byte(bytes: &[u8], pos: usize) -> Option<u8> {
    let hi = hex_value(*bytes.get(pos + 1)?)?;
    let lo = hex_value(*bytes.get(pos + 2)?)?;
    Some((hi << 4) | lo)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Length of the UTF-8 sequence introduced by `lead`.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}
