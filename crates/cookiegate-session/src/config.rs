//! Authenticator configuration.
//!
//! [`AuthConfig`] is read-only once an authenticator is built. It can be
//! constructed in code (start from `AuthConfig::new(name, secret)` and
//! override fields) or deserialized from JSON with the camelCase keys
//! most deployments already use (`cookieName`, `clearInvalid`, ...).

use std::fmt;

use cookiegate_codec::DEFAULT_VALUE_PREFIX;
use cookiegate_store::DEFAULT_SESSION_ID_PREFIX;
use serde::Deserialize;

use crate::ConfigError;

/// Default name of the session-record field holding the principal.
pub const DEFAULT_USER_PROP: &str = "user";

/// Query parameter used when `appendNext` is simply `true`.
pub const DEFAULT_NEXT_PARAM: &str = "next";

// ---------------------------------------------------------------------------
// AppendNext
// ---------------------------------------------------------------------------

/// Whether a redirect should carry the original request path, and under
/// which query parameter.
///
/// In JSON this is either a boolean (`true` means [`DEFAULT_NEXT_PARAM`])
/// or a string naming the parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawAppendNext")]
pub enum AppendNext {
    /// Redirect without a return path.
    #[default]
    Disabled,

    /// Append `?<name>=<encoded path>` to the redirect target.
    Param(String),
}

impl AppendNext {
    /// Returns the query parameter name, if enabled.
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::Disabled => None,
            Self::Param(name) => Some(name.as_str()),
        }
    }
}

impl From<bool> for AppendNext {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Param(DEFAULT_NEXT_PARAM.to_string())
        } else {
            Self::Disabled
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAppendNext {
    Flag(bool),
    Name(String),
}

impl From<RawAppendNext> for AppendNext {
    fn from(raw: RawAppendNext) -> Self {
        match raw {
            RawAppendNext::Flag(enabled) => enabled.into(),
            RawAppendNext::Name(name) => Self::Param(name),
        }
    }
}

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

/// Everything the authenticator needs to know about the cookie, the store
/// keys, and what to do with unauthenticated requests.
///
/// `Debug` is implemented by hand so the secret never ends up in logs.
#[derive(Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthConfig {
    /// Name of the cookie carrying the signed session ID. Required.
    pub cookie_name: String,

    /// Literal prefix marking a signed value. Default `"s:"`.
    pub cookie_value_prefix: String,

    /// HMAC secret shared with whoever issues the cookies. Required.
    pub secret: String,

    /// Prepended to the session ID to form the store key. Default `"sess:"`.
    pub session_id_prefix: String,

    /// Session-record field holding the principal. Default `"user"`.
    pub user_prop: String,

    /// Emit a clear-cookie directive when the signature check fails.
    pub clear_invalid: bool,

    /// Where to send unauthenticated requests. `None` returns the reason
    /// code instead.
    pub redirect_to: Option<String>,

    /// Whether (and how) to carry the original path on redirects.
    pub append_next: AppendNext,

    /// Also redirect requests in [`AuthMode::Try`](crate::AuthMode::Try).
    /// Default `true`.
    pub redirect_on_try: bool,
}

impl AuthConfig {
    /// Creates a config with the two required fields and defaults for the
    /// rest.
    pub fn new(cookie_name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON config and validates it.
    ///
    /// # Errors
    /// - [`ConfigError::Parse`] — not valid JSON for this shape
    /// - any error from [`validate`](Self::validate)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the combinations the authenticator cannot work with.
    ///
    /// # Errors
    /// Returns the first problem found, see [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cookie_name.is_empty() {
            return Err(ConfigError::MissingCookieName);
        }
        if self.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.user_prop.is_empty() {
            return Err(ConfigError::MissingUserProp);
        }
        match (&self.redirect_to, &self.append_next) {
            (Some(target), _) if target.is_empty() => {
                Err(ConfigError::EmptyRedirectTarget)
            }
            (None, AppendNext::Param(_)) => Err(ConfigError::AppendNextWithoutRedirect),
            (_, AppendNext::Param(name)) if name.is_empty() => {
                Err(ConfigError::EmptyNextParam)
            }
            _ => Ok(()),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::new(),
            cookie_value_prefix: DEFAULT_VALUE_PREFIX.to_string(),
            secret: String::new(),
            session_id_prefix: DEFAULT_SESSION_ID_PREFIX.to_string(),
            user_prop: DEFAULT_USER_PROP.to_string(),
            clear_invalid: false,
            redirect_to: None,
            append_next: AppendNext::Disabled,
            redirect_on_try: true,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie_name", &self.cookie_name)
            .field("cookie_value_prefix", &self.cookie_value_prefix)
            .field("secret", &"<redacted>")
            .field("session_id_prefix", &self.session_id_prefix)
            .field("user_prop", &self.user_prop)
            .field("clear_invalid", &self.clear_invalid)
            .field("redirect_to", &self.redirect_to)
            .field("append_next", &self.append_next)
            .field("redirect_on_try", &self.redirect_on_try)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::new("sid", "secret");
        assert_eq!(config.cookie_value_prefix, "s:");
        assert_eq!(config.session_id_prefix, "sess:");
        assert_eq!(config.user_prop, "user");
        assert!(!config.clear_invalid);
        assert!(config.redirect_to.is_none());
        assert_eq!(config.append_next, AppendNext::Disabled);
        assert!(config.redirect_on_try);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_required_fields() {
        assert!(matches!(
            AuthConfig::new("", "secret").validate(),
            Err(ConfigError::MissingCookieName)
        ));
        assert!(matches!(
            AuthConfig::new("sid", "").validate(),
            Err(ConfigError::MissingSecret)
        ));
        let config = AuthConfig {
            user_prop: String::new(),
            ..AuthConfig::new("sid", "secret")
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingUserProp)));
    }

    #[test]
    fn test_validate_rejects_append_next_without_redirect() {
        let config = AuthConfig {
            append_next: true.into(),
            ..AuthConfig::new("sid", "secret")
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AppendNextWithoutRedirect)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_redirect_and_param() {
        let config = AuthConfig {
            redirect_to: Some(String::new()),
            ..AuthConfig::new("sid", "secret")
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyRedirectTarget)));

        let config = AuthConfig {
            redirect_to: Some("/login".into()),
            append_next: AppendNext::Param(String::new()),
            ..AuthConfig::new("sid", "secret")
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyNextParam)));
    }

    #[test]
    fn test_from_json_camel_case_keys_and_defaults() {
        let config = AuthConfig::from_json(
            r#"{
                "cookieName": "sid",
                "secret": "keyboard cat",
                "clearInvalid": true,
                "redirectTo": "/login",
                "appendNext": true
            }"#,
        )
        .expect("valid config");

        assert_eq!(config.cookie_name, "sid");
        assert!(config.clear_invalid);
        assert_eq!(config.redirect_to.as_deref(), Some("/login"));
        assert_eq!(config.append_next.param(), Some("next"));
        assert_eq!(config.session_id_prefix, "sess:");
    }

    #[test]
    fn test_from_json_append_next_accepts_param_name() {
        let config = AuthConfig::from_json(
            r#"{"cookieName":"sid","secret":"s","redirectTo":"/login","appendNext":"returnTo"}"#,
        )
        .expect("valid config");
        assert_eq!(config.append_next.param(), Some("returnTo"));

        let config = AuthConfig::from_json(
            r#"{"cookieName":"sid","secret":"s","appendNext":false}"#,
        )
        .expect("valid config");
        assert_eq!(config.append_next, AppendNext::Disabled);
    }

    #[test]
    fn test_from_json_invalid_json_returns_parse_error() {
        assert!(matches!(
            AuthConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_missing_secret_fails_validation() {
        assert!(matches!(
            AuthConfig::from_json(r#"{"cookieName":"sid"}"#),
            Err(ConfigError::MissingSecret)
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("sid", "hunter2-but-longer");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2-but-longer"));
        assert!(debug.contains("<redacted>"));
    }
}
