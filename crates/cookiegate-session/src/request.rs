//! What the authenticator needs to see of an incoming request.
//!
//! The host framework owns the real request type. It only has to expose
//! two things through [`RequestState`]: a cookie by name and the request
//! path. [`IncomingRequest`] is a plain implementation for hosts that
//! prefer to hand over a `Cookie:` header, and for tests.

use std::collections::HashMap;

use cookiegate_codec::find_cookie;

/// How strictly the host route requires authentication.
///
/// With `redirect_on_try` disabled, a failed [`AuthMode::Try`] request is
/// reported as unauthenticated instead of being redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// The route requires an authenticated user.
    #[default]
    Required,

    /// Attempt authentication; the route handles failure itself.
    Try,
}

/// Read access to the parts of a request used for authentication.
pub trait RequestState {
    /// Returns the raw (still encoded) value of the cookie called `name`.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// The request path, including any query string. Used for `next`.
    fn path(&self) -> &str;

    /// The route's authentication mode.
    fn mode(&self) -> AuthMode {
        AuthMode::Required
    }
}

/// A minimal owned request: a path, cookies, and a mode.
///
/// Cookies set with [`with_cookie`](Self::with_cookie) take precedence
/// over the ones in the `Cookie:` header.
#[derive(Debug, Clone, Default)]
pub struct IncomingRequest {
    path: String,
    header: String,
    cookies: HashMap<String, String>,
    mode: AuthMode,
}

impl IncomingRequest {
    /// Creates a request for `path` with no cookies.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Creates a request from a raw `Cookie:` header.
    ///
    /// If a name appears more than once, the first value is kept.
    pub fn from_cookie_header(path: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            header: header.into(),
            ..Self::default()
        }
    }

    /// Adds (or replaces) a cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Sets the authentication mode.
    pub fn with_mode(mut self, mode: AuthMode) -> Self {
        self.mode = mode;
        self
    }
}

impl RequestState for IncomingRequest {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .get(name)
            .map(String::as_str)
            .or_else(|| find_cookie(&self.header, name))
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn mode(&self) -> AuthMode {
        self.mode
    }
}
