//! Unified error type for cookiegate.

use cookiegate_session::ConfigError;

/// Top-level error returned while setting cookiegate up.
///
/// Authentication itself never fails (it returns a
/// [`Decision`](cookiegate_session::Decision)), and a bad signing key is
/// reported as [`ConfigError::InvalidSecret`]. What remains is loading and
/// validating configuration. The `#[from]` attribute lets `?` convert
/// session-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum CookiegateError {
    /// Invalid or unparsable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
