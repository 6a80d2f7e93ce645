//! HMAC-SHA256 signing and verification of cookie values.
//!
//! A signed value has the shape `value.signature`, where `signature` is
//! the standard-alphabet base64 encoding (padding removed) of
//! `HMAC-SHA256(secret, value)`. This is the format most web frameworks
//! write for "signed cookies", so cookies issued elsewhere verify here
//! as long as the secret matches.
//!
//! On the wire the signed value is additionally tagged with a literal
//! prefix (default [`DEFAULT_VALUE_PREFIX`]) so a signed cookie can be told
//! apart from an unsigned one before any crypto runs.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::CodecError;

type HmacSha256 = Hmac<Sha256>;

/// Prefix that marks a cookie value as signed.
pub const DEFAULT_VALUE_PREFIX: &str = "s:";

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// The session identifier recovered from a verified cookie.
///
/// Only ever produced by a successful signature check, so holding a
/// `SessionId` means the value was issued by someone who knows the secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Borrows the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Signer
// ---------------------------------------------------------------------------

/// Signs and verifies cookie values with a shared secret.
///
/// The keyed MAC state is computed once in [`Signer::new`] and cloned for
/// every operation, so signing does not re-process the key.
///
/// `Clone` is cheap enough to hand one copy to each authenticator.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl Signer {
    /// Creates a signer for the given secret.
    ///
    /// # Errors
    /// Returns [`CodecError::InvalidKey`] if the MAC rejects the key.
    /// HMAC accepts keys of any length, so in practice this only guards
    /// against a future change of algorithm.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, CodecError> {
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .map_err(|e| CodecError::InvalidKey(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Returns `value.signature`.
    pub fn sign(&self, value: &str) -> String {
        format!("{value}.{}", self.signature(value))
    }

    /// Checks a `value.signature` string and returns `value`.
    ///
    /// The split happens at the LAST `.`, so the value itself may contain
    /// dots. The comparison runs in constant time.
    ///
    /// # Errors
    /// Returns [`CodecError::BadSignature`] when there is no `.` or the
    /// signature does not match.
    pub fn unsign<'a>(&self, signed: &'a str) -> Result<&'a str, CodecError> {
        let (value, signature) = signed.rsplit_once('.').ok_or(CodecError::BadSignature)?;

        let expected = self.signature(value);
        if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            Ok(value)
        } else {
            Err(CodecError::BadSignature)
        }
    }

    /// Checks the prefix of a decoded cookie, then its signature.
    ///
    /// # Errors
    /// - [`CodecError::NoPrefix`] — `decoded` does not start with `prefix`
    /// - [`CodecError::BadSignature`] — signature mismatch
    pub fn verify(&self, decoded: &str, prefix: &str) -> Result<SessionId, CodecError> {
        let payload = decoded.strip_prefix(prefix).ok_or(CodecError::NoPrefix)?;
        let value = self.unsign(payload)?;
        Ok(SessionId(value.to_string()))
    }

    fn signature(&self, value: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        STANDARD_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
