//! Error types for the session layer.

use cookiegate_store::StoreError;

use crate::outcome::{REASON_COOKIE, REASON_INVALID_COOKIE};

/// Why a request was not authenticated.
///
/// These never reach the caller as errors: the pipeline converts every
/// variant into an [`Outcome`](crate::Outcome). The split that matters is
/// [`is_server_error`](Self::is_server_error): "not logged in" versus
/// "could not find out".
#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    /// The cookie is absent, undecodable, or lacks the signed prefix.
    #[error("no recognizable session cookie")]
    NoCookie,

    /// The cookie carries the prefix but its signature does not verify.
    #[error("session cookie signature is invalid")]
    InvalidSignature,

    /// The signature is fine but the store has no such session.
    #[error("session not found in store")]
    SessionMiss,

    /// The session has no principal, or the principal is anonymous.
    #[error("session principal is missing or anonymous")]
    InvalidPrincipal,

    /// The store could not answer the lookup.
    #[error(transparent)]
    StoreFailure(#[from] StoreError),

    /// The store answered with something that is not a session record.
    #[error("session record is malformed: {0}")]
    MalformedSession(#[source] serde_json::Error),

    /// The caller cancelled the request while the lookup was in flight.
    #[error("authentication aborted")]
    Aborted,
}

impl AuthFailure {
    /// Returns `true` when the outcome must be a server error rather than
    /// "unauthenticated".
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::StoreFailure(_) | Self::MalformedSession(_) | Self::Aborted
        )
    }

    /// The reason code reported for unauthenticated outcomes.
    ///
    /// Only a failed signature gets its own code; everything else the
    /// client could have caused is reported as `"cookie"`.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignature => REASON_INVALID_COOKIE,
            _ => REASON_COOKIE,
        }
    }
}

/// Errors from [`AuthConfig`](crate::AuthConfig) parsing and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config is not valid JSON for [`AuthConfig`](crate::AuthConfig).
    #[error("invalid config: {0}")]
    Parse(#[source] serde_json::Error),

    /// No cookie name was given.
    #[error("cookieName must not be empty")]
    MissingCookieName,

    /// No signing secret was given.
    #[error("secret must not be empty")]
    MissingSecret,

    /// The principal field name is empty.
    #[error("userProp must not be empty")]
    MissingUserProp,

    /// `redirectTo` is present but empty.
    #[error("redirectTo must not be empty when set")]
    EmptyRedirectTarget,

    /// `appendNext` only means something when there is a redirect.
    #[error("appendNext requires redirectTo")]
    AppendNextWithoutRedirect,

    /// `appendNext` names an empty query parameter.
    #[error("appendNext parameter name must not be empty")]
    EmptyNextParam,

    /// The secret was rejected when building the signer.
    #[error("invalid secret: {0}")]
    InvalidSecret(#[from] cookiegate_codec::CodecError),
}
