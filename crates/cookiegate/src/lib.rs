//! # cookiegate
//!
//! Signed-cookie session authentication for Rust request pipelines.
//!
//! A request carries a cookie like `s:<session id>.<hmac>`. cookiegate
//! verifies the HMAC, looks the session up in a shared store, checks that
//! it belongs to a real user, and tells the host what to do: let the
//! request through, reject it, redirect it to a login page, or report a
//! server error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cookiegate::prelude::*;
//!
//! # async fn run() -> Result<(), CookiegateError> {
//! let store = Arc::new(MemoryStore::new());
//! let auth = CookieGate::builder()
//!     .cookie_name("sid")
//!     .secret("keyboard cat")
//!     .redirect_to("/login")
//!     .append_next(true)
//!     .build(store)?;
//!
//! let request = IncomingRequest::from_cookie_header("/dashboard", "sid=s%3Aabc.sig");
//! let decision = auth.authenticate(&request).await;
//! # let _ = decision;
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod telemetry;

pub use builder::{CookieGate, CookieGateBuilder};
pub use error::CookiegateError;
pub use telemetry::init_tracing;

pub use cookiegate_codec as codec;
pub use cookiegate_session as session;
pub use cookiegate_store as store;

/// Everything a host needs to wire cookiegate in.
pub mod prelude {
    pub use crate::{CookieGate, CookieGateBuilder, CookiegateError, init_tracing};
    pub use cookiegate_codec::{SessionId, Signer};
    pub use cookiegate_session::{
        AppendNext, AuthConfig, AuthMode, Authenticator, ClearCookie,
        CookieAuthenticator, Decision, IncomingRequest, Outcome, RequestState,
        SessionRecord,
    };
    pub use cookiegate_store::{MemoryStore, SessionStore, StoreError};
}
