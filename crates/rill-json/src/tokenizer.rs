//! Stateless token scanners over a byte buffer prefix.
//!
//! Every function here operates on a view that may be a partial chunk from a
//! stream, so "not enough bytes yet" is a normal outcome, distinct from a
//! syntax error. The caller (the tree builder) owns the decision of whether
//! a partial token means "wait for the next chunk" or "the input ended
//! mid-token".
//!
//! Strings are returned as the raw bytes between the quotes: escape
//! sequences are recognized only far enough to find the closing quote, and
//! are *not* decoded.

use crate::error::{JsonError, Result};
use crate::value::JsonValue;

/// Numeric literals whose distance from the nearest integer falls within
/// this window are classified as integers (`f64::EPSILON * 100`), so `2.0`
/// parses as `Integer(2)` while `2.5` stays a double.
const INTEGER_WINDOW: f64 = f64::EPSILON * 100.0;

/// Outcome of scanning a multi-byte token from a buffer prefix.
pub(crate) enum TokenScan {
    /// A complete token: the parsed value and the bytes consumed.
    Complete(JsonValue, usize),
    /// The token may continue past the end of the buffer; retry with more
    /// input appended.
    Partial,
}

/// Count the leading whitespace bytes (space, tab, CR, LF).
pub(crate) fn trim(buf: &[u8]) -> usize {
    buf.iter()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .count()
}

/// A byte that can appear in a number literal: ASCII digit, `.`, or `-`.
pub(crate) fn is_numeric(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b'-'
}

/// Scan a string token. `buf[0]` must be the opening quote.
///
/// Returns the exclusive end of the raw content (so the content is
/// `buf[1..end]`) and the total bytes consumed including both quotes, or
/// `None` when no unescaped closing quote exists in this buffer.
pub(crate) fn scan_string(buf: &[u8]) -> Option<(usize, usize)> {
    let mut escaped = false;
    for (i, &b) in buf.iter().enumerate().skip(1) {
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'"' {
            return Some((i, i + 1));
        }
    }
    None
}

/// Scan a number token. `buf[0]` must satisfy [`is_numeric`].
///
/// Takes the maximal contiguous numeric run; when the run reaches the end of
/// a non-final buffer the number may continue in the next chunk, so the scan
/// reports [`TokenScan::Partial`] instead of classifying a prefix.
pub(crate) fn scan_number(buf: &[u8], at_end: bool) -> Result<TokenScan> {
    let run = buf.iter().take_while(|&&b| is_numeric(b)).count();
    if run == buf.len() && !at_end {
        return Ok(TokenScan::Partial);
    }
    Ok(TokenScan::Complete(classify_number(&buf[..run])?, run))
}

/// Parse a numeric run as a 64-bit float and classify it as integer or
/// double by the epsilon rule.
fn classify_number(raw: &[u8]) -> Result<JsonValue> {
    let text = std::str::from_utf8(raw).map_err(|_| JsonError::malformed("invalid number literal"))?;
    let n: f64 = text
        .parse()
        .map_err(|_| JsonError::malformed(format!("invalid number literal: {text}")))?;
    if (n % 1.0).abs() <= INTEGER_WINDOW {
        Ok(JsonValue::Integer(n as i64))
    } else {
        Ok(JsonValue::Double(n))
    }
}

/// Scan one of the literal keywords `null`, `true`, `false`. `buf[0]` must
/// be `n`, `t`, or `f`.
pub(crate) fn scan_literal(buf: &[u8], at_end: bool) -> Result<TokenScan> {
    let (keyword, value): (&[u8], JsonValue) = match buf[0] {
        b'n' => (b"null", JsonValue::Null),
        b't' => (b"true", JsonValue::Bool(true)),
        b'f' => (b"false", JsonValue::Bool(false)),
        other => {
            return Err(JsonError::malformed(format!(
                "unexpected byte '{}' in literal position",
                other as char
            )))
        }
    };

    let have = buf.len().min(keyword.len());
    if buf[..have] != keyword[..have] {
        return Err(JsonError::malformed(format!(
            "unrecognized literal starting with '{}'",
            buf[0] as char
        )));
    }
    if buf.len() < keyword.len() {
        if at_end {
            return Err(JsonError::unterminated(format!(
                "input ended inside the literal '{}'",
                std::str::from_utf8(keyword).unwrap_or("?")
            )));
        }
        return Ok(TokenScan::Partial);
    }
    Ok(TokenScan::Complete(value, keyword.len()))
}
