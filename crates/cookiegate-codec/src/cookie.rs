//! Cookie value decoding and `Cookie:` header parsing.
//!
//! Browsers and proxies are inconsistent about how they escape cookie
//! values. Before a value can be checked for a signature it is brought
//! into one canonical form:
//!
//! ```text
//! raw ──percent-decode──→ trim ──strip quotes──→ DecodedCookie
//! ```
//!
//! Decoding is idempotent on well-formed input: decoding an already
//! decoded value gives the same value back. Values that themselves
//! contain escape sequences (e.g. `%2541`) are the exception.

use std::fmt;

use crate::CodecError;

// ---------------------------------------------------------------------------
// DecodedCookie
// ---------------------------------------------------------------------------

/// A cookie value in canonical form, ready for prefix and signature checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCookie(String);

impl DecodedCookie {
    /// Borrows the decoded value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DecodedCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// decode
// ---------------------------------------------------------------------------

/// Decodes a raw cookie value into its canonical form.
///
/// Steps, in order:
/// 1. percent-decode
/// 2. trim leading/trailing whitespace
/// 3. if the first character is `"`, drop the first AND the last character
///
/// Step 3 does not check that the last character is also a quote, so
/// `"abc` decodes to `ab`. Callers rely on this exact behavior.
///
/// # Errors
/// - [`CodecError::Missing`] — `raw` is empty
/// - [`CodecError::Malformed`] — a bad `%` escape or non-UTF-8 result
pub fn decode(raw: &str) -> Result<DecodedCookie, CodecError> {
    if raw.is_empty() {
        return Err(CodecError::Missing);
    }

    if let Some(pos) = find_malformed_escape(raw) {
        return Err(CodecError::Malformed(format!(
            "invalid percent escape at byte {pos}"
        )));
    }

    let decoded = urlencoding::decode(raw)
        .map_err(|e| CodecError::Malformed(e.to_string()))?;

    let trimmed = decoded.trim();

    let value = match trimmed.strip_prefix('"') {
        Some(rest) => {
            let mut chars = rest.chars();
            chars.next_back();
            chars.as_str()
        }
        None => trimmed,
    };

    Ok(DecodedCookie(value.to_string()))
}

/// Returns the byte offset of the first `%` that is not followed by two
/// hex digits, if any.
///
/// `urlencoding` passes such sequences through untouched; cookie decoding
/// must reject them instead.
fn find_malformed_escape(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Some(i);
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Cookie header
// ---------------------------------------------------------------------------

/// Splits a `Cookie:` request header into `(name, value)` pairs.
///
/// Pairs are separated by `;`. Each pair is split on its FIRST `=`, so
/// values may contain `=` (base64 padding, for instance). Names and values
/// are trimmed; pairs without `=` or with an empty name are skipped.
/// Values are returned raw — run them through [`decode`] afterwards.
pub fn parse_cookie_header(header: &str) -> Vec<(&str, &str)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name, value.trim()))
        })
        .collect()
}

/// Finds the raw value of the cookie called `name` in a `Cookie:` header.
///
/// If the browser sent the same name more than once, the first one wins.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    parse_cookie_header(header)
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v)
}

// =========================================================================
// Tests
// =========================================================================
