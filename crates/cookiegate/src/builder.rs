//! `CookieGate` builder.
//!
//! This is the entry point for wiring cookiegate into a host. It ties
//! together the layers: config → codec (signer) → store → session
//! pipeline.

use std::sync::Arc;

use cookiegate_session::{AppendNext, AuthConfig, CookieAuthenticator};
use cookiegate_store::SessionStore;

use crate::CookiegateError;

/// Namespace for constructing authenticators.
///
/// # Example
///
/// ```rust,ignore
/// use cookiegate::prelude::*;
///
/// let auth = CookieGate::builder()
///     .cookie_name("sid")
///     .secret(std::env::var("SESSION_SECRET")?)
///     .clear_invalid(true)
///     .build(Arc::new(my_store))?;
/// ```
pub struct CookieGate;

impl CookieGate {
    /// Creates a new builder with default settings.
    pub fn builder() -> CookieGateBuilder {
        CookieGateBuilder::new()
    }

    /// Builds an authenticator from a JSON config document.
    ///
    /// # Errors
    /// Returns [`CookiegateError::Config`] if the JSON does not parse or
    /// does not validate.
    pub fn from_json<S: SessionStore>(
        json: &str,
        store: Arc<S>,
    ) -> Result<CookieAuthenticator<S>, CookiegateError> {
        CookieGateBuilder::from_config(AuthConfig::from_json(json)?).build(store)
    }
}

/// Builder for configuring a [`CookieAuthenticator`].
///
/// Unset fields keep the [`AuthConfig`] defaults. `cookie_name` and
/// `secret` must be set before [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CookieGateBuilder {
    config: AuthConfig,
}

impl CookieGateBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing config, e.g. one loaded from JSON.
    pub fn from_config(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Sets the name of the session cookie.
    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.config.cookie_name = name.into();
        self
    }

    /// Sets the HMAC secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = secret.into();
        self
    }

    /// Sets the literal prefix of signed cookie values.
    pub fn cookie_value_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.cookie_value_prefix = prefix.into();
        self
    }

    /// Sets the prefix prepended to session IDs for store keys.
    pub fn session_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.session_id_prefix = prefix.into();
        self
    }

    /// Sets the session-record field holding the principal.
    pub fn user_prop(mut self, field: impl Into<String>) -> Self {
        self.config.user_prop = field.into();
        self
    }

    /// Emits a clear-cookie directive on signature failures.
    pub fn clear_invalid(mut self, clear: bool) -> Self {
        self.config.clear_invalid = clear;
        self
    }

    /// Redirects unauthenticated requests to `target`.
    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.config.redirect_to = Some(target.into());
        self
    }

    /// Carries the original path on redirects.
    ///
    /// Accepts `true`/`false` or an [`AppendNext`] naming the parameter.
    pub fn append_next(mut self, append: impl Into<AppendNext>) -> Self {
        self.config.append_next = append.into();
        self
    }

    /// Whether requests in try mode are redirected too.
    pub fn redirect_on_try(mut self, redirect: bool) -> Self {
        self.config.redirect_on_try = redirect;
        self
    }

    /// Validates the config and builds the authenticator over `store`.
    ///
    /// The store handle is shared: clone the `Arc` beforehand to keep
    /// using it elsewhere (for example, to write sessions at login).
    ///
    /// # Errors
    /// Returns [`CookiegateError::Config`] if validation fails.
    pub fn build<S: SessionStore>(
        self,
        store: Arc<S>,
    ) -> Result<CookieAuthenticator<S>, CookiegateError> {
        let auth = CookieAuthenticator::new(self.config, store)?;
        tracing::info!(cookie = %auth.config().cookie_name, "cookiegate ready");
        Ok(auth)
    }
}
