//! Authentication hook for host request pipelines.
//!
//! cookiegate doesn't know which web framework it runs in. Instead it
//! defines the [`Authenticator`] trait: a single async method that takes
//! a request and returns a [`Decision`]. The host calls it from whatever
//! middleware, filter, or extractor mechanism it has, then turns the
//! decision into a response.
//!
//! [`CookieAuthenticator`](crate::CookieAuthenticator) is the signed-cookie
//! implementation. Tests and alternative schemes can provide their own.

use std::future::Future;

use crate::{AuthFailure, Decision, RequestState};

/// Decides whether a request is authenticated.
///
/// # Trait bounds
///
/// - `Send + Sync` → one authenticator serves every request, from any
///   worker thread.
/// - `'static` → it lives as long as the server, not a single request.
///
/// # Example
///
/// ```rust
/// use cookiegate_session::{Authenticator, Decision, RequestState};
///
/// /// Rejects everything. Handy as a placeholder while wiring routes.
/// struct DenyAll;
///
/// impl Authenticator for DenyAll {
///     async fn authenticate<R: RequestState + Sync>(&self, _request: &R) -> Decision {
///         Decision::server_error()
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Produces the decision for `request`.
    ///
    /// Never fails: every error is folded into the returned [`Decision`].
    fn authenticate<R: RequestState + Sync>(
        &self,
        request: &R,
    ) -> impl Future<Output = Decision> + Send;

    /// Like [`authenticate`](Self::authenticate), but gives up as soon as
    /// `cancel` completes.
    ///
    /// A cancelled decision is a server error, never "unauthenticated":
    /// the request was not shown to be anonymous, it just was not checked.
    /// `cancel` is polled first, so an already-cancelled request is never
    /// evaluated.
    fn authenticate_or_abort<R, F>(
        &self,
        request: &R,
        cancel: F,
    ) -> impl Future<Output = Decision> + Send
    where
        R: RequestState + Sync,
        F: Future<Output = ()> + Send,
    {
        async move {
            tokio::select! {
                biased;
                () = cancel => {
                    tracing::warn!(
                        error = %AuthFailure::Aborted,
                        "authentication did not complete"
                    );
                    Decision::server_error()
                }
                decision = self.authenticate(request) => decision,
            }
        }
    }
}
