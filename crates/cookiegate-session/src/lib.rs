//! Signed-cookie session authentication for cookiegate.
//!
//! This crate decides whether a request carries a valid session:
//!
//! 1. **Cookie** — read the session cookie and verify its signature
//!    (via `cookiegate-codec`)
//! 2. **Lookup** — fetch the session record from a shared
//!    [`SessionStore`](cookiegate_store::SessionStore)
//! 3. **Policy** — accept the record only if it names a real principal
//! 4. **Resolution** — turn failures into an unauthenticated outcome, a
//!    redirect, or a server error
//!
//! # How it fits in the stack
//!
//! ```text
//! Host pipeline (above)  ← calls Authenticator::authenticate per request
//!     ↕
//! Session Layer (this crate)  ← pipeline, policy, outcome resolution
//!     ↕
//! Codec + Store (below)  ← signatures, cookie decoding, key-value lookup
//! ```

mod auth;
mod config;
mod error;
mod outcome;
mod pipeline;
pub mod policy;
mod request;
pub mod resolver;

pub use auth::Authenticator;
pub use config::{AppendNext, AuthConfig, DEFAULT_NEXT_PARAM, DEFAULT_USER_PROP};
pub use error::{AuthFailure, ConfigError};
pub use outcome::{
    ClearCookie, Decision, Outcome, REASON_COOKIE, REASON_INVALID_COOKIE,
    REDIRECT_MESSAGE, SERVER_ERROR_MESSAGE,
};
pub use pipeline::CookieAuthenticator;
pub use policy::SessionRecord;
pub use request::{AuthMode, IncomingRequest, RequestState};
