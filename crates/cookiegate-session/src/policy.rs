//! Session record parsing and principal checks.
//!
//! The store hands back raw bytes. Those are parsed as a JSON object
//! ([`SessionRecord`]) and the principal is pulled out of one configured
//! field. The record is accepted only if that principal is present,
//! truthy, and not the anonymous user.
//!
//! ```text
//! bytes ──parse──→ SessionRecord ──principal field──→ accept / reject
//!   │                  │                                   │
//!   None → SessionMiss  └ parse error → MalformedSession    └ InvalidPrincipal
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AuthFailure;

/// Principal `name` that marks a session as logged out.
pub const ANONYMOUS_NAME: &str = "Anonymous";

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// A parsed session payload: a string-keyed JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(Map<String, Value>);

impl SessionRecord {
    /// Parses raw store bytes.
    ///
    /// # Errors
    /// Fails if the bytes are not JSON, or are JSON but not an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Wraps an existing JSON value, which must be an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Looks up a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// evaluate
// ---------------------------------------------------------------------------

/// Applies the session policy to a store lookup result.
///
/// # Errors
/// - [`AuthFailure::SessionMiss`] — `bytes` is `None`
/// - [`AuthFailure::MalformedSession`] — not a JSON object
/// - [`AuthFailure::InvalidPrincipal`] — principal missing, falsy, or
///   anonymous
pub fn evaluate(bytes: Option<&[u8]>, principal_field: &str) -> Result<SessionRecord, AuthFailure> {
    let bytes = bytes.ok_or(AuthFailure::SessionMiss)?;

    let record = SessionRecord::from_slice(bytes)
        .map_err(AuthFailure::MalformedSession)?;

    let principal = record
        .get(principal_field)
        .filter(|p| is_truthy(p))
        .ok_or(AuthFailure::InvalidPrincipal)?;

    if is_anonymous(principal) {
        return Err(AuthFailure::InvalidPrincipal);
    }

    Ok(record)
}

/// JSON truthiness: `null`, `false`, `0`, and `""` are falsy. Objects and
/// arrays are truthy even when empty.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_anonymous(principal: &Value) -> bool {
    principal.get("name").and_then(Value::as_str) == Some(ANONYMOUS_NAME)
}
