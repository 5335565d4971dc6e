//! Flat object codec
//!
//! Decodes `"key":value` pairs out of request bodies and encodes strings back
//! into quoted, escaped wire text. Only flat scalar members are recognized;
//! nested objects and arrays must be assembled by hand and cannot be decoded.

use log::debug;

use crate::wire::values::WireObject;

/// Literal emitted for an absent value
pub const NULL: &str = "null";

/// Decode every flat `"key":value` pair found in `text`.
///
/// Values may be a double-quoted string, a bare `true`/`false`, or a bare
/// `-?digits(.digits)?` literal. All values come back as literal text;
/// anything else is skipped. A repeated key keeps its last value.
pub fn decode(text: &str) -> WireObject {
    let mut fields = WireObject::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('"') {
        let start = pos + offset;
        match match_pair(text, start) {
            Some((key, value, end)) => {
                fields.insert(key, value);
                pos = end;
            }
            None => pos = start + 1,
        }
    }

    debug!("Decoded {} wire field(s)", fields.len());
    fields
}

/// Quote and escape a string for the wire
pub fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Encode an optional string, using the bare `null` literal for `None`
pub fn encode_optional(value: Option<&str>) -> String {
    match value {
        Some(v) => encode(v),
        None => NULL.to_string(),
    }
}

/// Attempts to match a pair whose key opens with the quote at `start`.
/// Returns the key, the decoded value and the byte offset just past the value.
fn match_pair(text: &str, start: usize) -> Option<(String, String, usize)> {
    let bytes = text.as_bytes();
    let key_start = start + 1;
    let key_len = text[key_start..].find('"')?;
    if key_len == 0 {
        return None;
    }
    let key = &text[key_start..key_start + key_len];

    let mut pos = skip_whitespace(bytes, key_start + key_len + 1);
    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    pos = skip_whitespace(bytes, pos + 1);

    let (value, end) = match_value(text, pos)?;
    Some((key.to_string(), value, end))
}

fn match_value(text: &str, pos: usize) -> Option<(String, usize)> {
    let rest = &text[pos..];
    if rest.starts_with('"') {
        let len = quoted_len(rest)?;
        return Some((unescape(&rest[1..len - 1]), pos + len));
    }

    for literal in ["true", "false"] {
        if rest.starts_with(literal) {
            return Some((literal.to_string(), pos + literal.len()));
        }
    }

    let len = number_len(rest)?;
    Some((rest[..len].to_string(), pos + len))
}

/// Length in bytes of the quoted string at the start of `rest`, quotes included.
fn quoted_len(rest: &str) -> Option<usize> {
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next()?;
            }
            '"' => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Length in bytes of a `-?digits(.digits)?` literal at the start of `rest`.
fn number_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut len = usize::from(bytes.first() == Some(&b'-'));

    let digits = count_digits(&bytes[len..]);
    if digits == 0 {
        return None;
    }
    len += digits;

    if bytes.get(len) == Some(&b'.') {
        let fraction = count_digits(&bytes[len + 1..]);
        if fraction > 0 {
            len += 1 + fraction;
        }
    }
    Some(len)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
        pos += 1;
    }
    pos
}

/// Unknown escapes are kept as written, backslash included.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
