//! The result of one authentication decision.
//!
//! Every request produces exactly one [`Decision`]: an [`Outcome`] plus,
//! at most, a directive to clear the session cookie.

use crate::SessionRecord;

/// Reason code for every "no usable session" failure.
pub const REASON_COOKIE: &str = "cookie";

/// Reason code for a cookie whose signature did not verify.
pub const REASON_INVALID_COOKIE: &str = "Invalid cookie";

/// The only message a client ever sees for store-side failures.
pub const SERVER_ERROR_MESSAGE: &str = "Server error when checking authorization";

/// Body sent along with a redirect to the login page.
pub const REDIRECT_MESSAGE: &str = "You are being redirected...";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Terminal state of the authentication pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The session is valid.
    ///
    /// `artifacts` and `credentials` are the same record. Hosts hand them
    /// to different consumers (credentials to authorization, artifacts to
    /// the route), so both are filled.
    Authenticated {
        artifacts: SessionRecord,
        credentials: SessionRecord,
    },

    /// Not authenticated, and no redirect is configured (or applies).
    Unauthenticated { reason: &'static str },

    /// Not authenticated; send the client to `target` with `body`.
    Redirect { target: String, body: &'static str },

    /// The decision could not be made. `message` is generic on purpose.
    ServerError { message: &'static str },
}

impl Outcome {
    /// Returns `true` for [`Outcome::Authenticated`].
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the credentials of an authenticated outcome.
    pub fn credentials(&self) -> Option<&SessionRecord> {
        match self {
            Self::Authenticated { credentials, .. } => Some(credentials),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Instruction for the host to remove a cookie on the next response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearCookie {
    /// Name of the cookie to clear.
    pub name: String,
}

/// An [`Outcome`] plus the optional clear-cookie side channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub outcome: Outcome,
    pub clear_cookie: Option<ClearCookie>,
}

impl Decision {
    /// A successful decision for `record`.
    pub fn authenticated(record: SessionRecord) -> Self {
        Self {
            outcome: Outcome::Authenticated {
                artifacts: record.clone(),
                credentials: record,
            },
            clear_cookie: None,
        }
    }

    /// A server-error decision with the generic message.
    pub fn server_error() -> Self {
        Self {
            outcome: Outcome::ServerError {
                message: SERVER_ERROR_MESSAGE,
            },
            clear_cookie: None,
        }
    }
}
