//! Turns a failed authentication into the response signal for the host.
//!
//! ```text
//! AuthFailure ─┬─ server error ───────────────────────→ ServerError
//!              ├─ redirect configured (and applies) ──→ Redirect
//!              └─ otherwise ──────────────────────────→ Unauthenticated
//! ```
//!
//! Store-side failures are never redirected: sending a user to the login
//! page because the session store is down would look like a logout.

use crate::outcome::{REDIRECT_MESSAGE, SERVER_ERROR_MESSAGE};
use crate::{AuthConfig, AuthFailure, AuthMode, Outcome, RequestState};

/// Resolves `failure` into an [`Outcome`] under `config`.
pub fn resolve<R: RequestState + ?Sized>(
    failure: &AuthFailure,
    config: &AuthConfig,
    request: &R,
) -> Outcome {
    if failure.is_server_error() {
        return Outcome::ServerError {
            message: SERVER_ERROR_MESSAGE,
        };
    }

    let skip_redirect = request.mode() == AuthMode::Try && !config.redirect_on_try;

    match &config.redirect_to {
        Some(target) if !skip_redirect => Outcome::Redirect {
            target: redirect_target(target, config.append_next.param(), request.path()),
            body: REDIRECT_MESSAGE,
        },
        _ => Outcome::Unauthenticated {
            reason: failure.reason(),
        },
    }
}

/// Builds the redirect URI, appending `param=<encoded path>` if asked.
///
/// Uses `&` when `target` already has a query string, `?` otherwise.
pub fn redirect_target(target: &str, param: Option<&str>, path: &str) -> String {
    match param {
        Some(param) => {
            let separator = if target.contains('?') { '&' } else { '?' };
            format!("{target}{separator}{param}={}", urlencoding::encode(path))
        }
        None => target.to_string(),
    }
}
