//! Error types for the codec layer.
//!
//! Each crate in cookiegate defines its own error enum. A `CodecError`
//! always means the cookie itself was unusable; it never describes a
//! problem with the session store or the session contents.

/// Errors that can occur while decoding or verifying a cookie value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// No cookie value was present, or it was the empty string.
    #[error("cookie value is missing")]
    Missing,

    /// The value could not be percent-decoded.
    ///
    /// Either a `%` was not followed by two hex digits, or the decoded
    /// bytes were not valid UTF-8.
    #[error("cookie value is malformed: {0}")]
    Malformed(String),

    /// The decoded value does not start with the signed-value prefix.
    ///
    /// This is "no recognizable session cookie", not a forgery attempt.
    #[error("cookie value does not carry the signed prefix")]
    NoPrefix,

    /// The HMAC signature did not match the value.
    #[error("cookie signature is invalid")]
    BadSignature,

    /// The signing secret was rejected by the MAC implementation.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}

impl CodecError {
    /// Returns `true` for the one failure that indicates tampering
    /// (or a rotated secret) rather than a merely absent cookie.
    pub fn is_signature_failure(&self) -> bool {
        matches!(self, Self::BadSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_signature_failure_only_for_bad_signature() {
        assert!(CodecError::BadSignature.is_signature_failure());
        assert!(!CodecError::Missing.is_signature_failure());
        assert!(!CodecError::NoPrefix.is_signature_failure());
        assert!(!CodecError::Malformed("%zz".into()).is_signature_failure());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = CodecError::Malformed("bad escape at 3".into());
        assert_eq!(err.to_string(), "cookie value is malformed: bad escape at 3");
    }
}
