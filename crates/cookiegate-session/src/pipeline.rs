//! The signed-cookie authentication pipeline.
//!
//! This is where the stages meet. Each one can end the request early:
//!
//! ```text
//! Start
//!   │ cookie present?        no ──→ NoCookie
//!   │ decodes, has prefix?   no ──→ NoCookie
//!   │ signature valid?       no ──→ InvalidSignature (+ clear cookie)
//!   │ store.get(key)        err ──→ StoreFailure
//!   │ store hit?             no ──→ SessionMiss
//!   │ principal valid?       no ──→ InvalidPrincipal / MalformedSession
//!   ▼
//! Authenticated
//! ```
//!
//! Failures are resolved into an [`Outcome`](crate::Outcome) by
//! [`resolver::resolve`](crate::resolver::resolve).
//!
//! # Concurrency note
//!
//! `CookieAuthenticator` holds no mutable state. The config and signer are
//! read-only after construction and the store is shared through an `Arc`,
//! so one instance can serve any number of concurrent requests. The store
//! lookup is the only `.await`; dropping the future there leaves nothing
//! half-applied.

use std::sync::Arc;

use cookiegate_codec::{Signer, decode};
use cookiegate_store::{SessionStore, session_key};

use crate::{
    AuthConfig, AuthFailure, Authenticator, ClearCookie, ConfigError, Decision,
    RequestState, SessionRecord, policy, resolver,
};

/// Authenticates requests by their signed session cookie.
pub struct CookieAuthenticator<S: SessionStore> {
    config: AuthConfig,
    signer: Signer,
    store: Arc<S>,
}

impl<S: SessionStore> CookieAuthenticator<S> {
    /// Creates an authenticator over a shared store handle.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `config` does not validate.
    pub fn new(config: AuthConfig, store: Arc<S>) -> Result<Self, ConfigError> {
        config.validate()?;
        let signer = Signer::new(&config.secret)?;

        tracing::debug!(
            cookie = %config.cookie_name,
            redirect = config.redirect_to.is_some(),
            "cookie authenticator configured"
        );

        Ok(Self {
            config,
            signer,
            store,
        })
    }

    /// The configuration this authenticator was built with.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// The signer, for hosts that also issue cookies with the same secret.
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Runs the stages and returns the session record or the first failure.
    async fn validate<R: RequestState + Sync>(
        &self,
        request: &R,
    ) -> Result<SessionRecord, AuthFailure> {
        let raw = request
            .cookie(&self.config.cookie_name)
            .ok_or(AuthFailure::NoCookie)?;

        let decoded = decode(raw).map_err(|_| AuthFailure::NoCookie)?;

        let session_id = self
            .signer
            .verify(decoded.as_str(), &self.config.cookie_value_prefix)
            .map_err(|e| {
                if e.is_signature_failure() {
                    AuthFailure::InvalidSignature
                } else {
                    AuthFailure::NoCookie
                }
            })?;

        let key = session_key(&self.config.session_id_prefix, session_id.as_str());
        let bytes = self.store.get(&key).await?;

        policy::evaluate(bytes.as_deref(), &self.config.user_prop)
    }

    fn clear_directive(&self, failure: &AuthFailure) -> Option<ClearCookie> {
        let clear = self.config.clear_invalid
            && matches!(failure, AuthFailure::InvalidSignature);
        clear.then(|| ClearCookie {
            name: self.config.cookie_name.clone(),
        })
    }
}

impl<S: SessionStore> Authenticator for CookieAuthenticator<S> {
    async fn authenticate<R: RequestState + Sync>(&self, request: &R) -> Decision {
        let failure = match self.validate(request).await {
            Ok(record) => {
                tracing::debug!(cookie = %self.config.cookie_name, "session authenticated");
                return Decision::authenticated(record);
            }
            Err(failure) => failure,
        };

        match &failure {
            AuthFailure::InvalidSignature => {
                tracing::warn!(
                    cookie = %self.config.cookie_name,
                    clear = self.config.clear_invalid,
                    "rejected cookie with invalid signature"
                );
            }
            f if f.is_server_error() => {
                tracing::error!(error = %f, "session lookup failed");
            }
            f => {
                tracing::debug!(reason = %f, path = request.path(), "request not authenticated");
            }
        }

        Decision {
            clear_cookie: self.clear_directive(&failure),
            outcome: resolver::resolve(&failure, &self.config, request),
        }
    }
}

impl<S: SessionStore> std::fmt::Debug for CookieAuthenticator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieAuthenticator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
