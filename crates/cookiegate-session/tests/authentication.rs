//! End-to-end tests for the authentication pipeline.
//!
//! Each test builds a real `CookieAuthenticator` over a store double and
//! drives it through the public `Authenticator` trait, the same way a
//! host framework would.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cookiegate_codec::Signer;
use cookiegate_session::{
    AppendNext, AuthConfig, AuthMode, Authenticator, ClearCookie,
    CookieAuthenticator, IncomingRequest, Outcome,
};
use cookiegate_store::{MemoryStore, SessionStore, StoreError};

// =========================================================================
// Store doubles
// =========================================================================

/// Always fails with a connection error.
struct BrokenStore;

impl SessionStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Connection("connection refused".into()))
    }
}

/// Never answers.
struct HangingStore;

impl SessionStore for HangingStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        std::future::pending().await
    }
}

/// Counts lookups and remembers the last key.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
    last_key: std::sync::Mutex<Option<String>>,
}

impl SessionStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(key.to_string());
        self.inner.get(key).await
    }
}

// =========================================================================
// Helpers
// =========================================================================

const SECRET: &str = "keyboard cat";
const ALICE: &str = r#"{"user":{"name":"Alice","id":7}}"#;

fn config() -> AuthConfig {
    AuthConfig::new("sid", SECRET)
}

fn signed(session_id: &str) -> String {
    format!("s:{}", Signer::new(SECRET).unwrap().sign(session_id))
}

fn request(cookie: &str) -> IncomingRequest {
    IncomingRequest::new("/dashboard").with_cookie("sid", cookie)
}

async fn memory_auth(
    config: AuthConfig,
    records: &[(&str, &str)],
) -> CookieAuthenticator<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for (key, value) in records {
        store.insert(*key, *value).await;
    }
    CookieAuthenticator::new(config, store).expect("valid config")
}

// =========================================================================
// Missing / unrecognized cookies
// =========================================================================

#[tokio::test]
async fn test_missing_cookie_is_unauthenticated_cookie() {
    let auth = memory_auth(config(), &[]).await;

    let decision = auth.authenticate(&IncomingRequest::new("/dashboard")).await;

    assert_eq!(decision.outcome, Outcome::Unauthenticated { reason: "cookie" });
    assert!(decision.clear_cookie.is_none());
}

#[tokio::test]
async fn test_empty_or_blank_cookie_is_unauthenticated_cookie() {
    let auth = memory_auth(config(), &[]).await;

    for value in ["", "   ", "\"\"", "%20"] {
        let decision = auth.authenticate(&request(value)).await;
        assert_eq!(
            decision.outcome,
            Outcome::Unauthenticated { reason: "cookie" },
            "cookie {value:?}"
        );
    }
}

#[tokio::test]
async fn test_wrong_prefix_is_unauthenticated_cookie_regardless_of_content() {
    let config = AuthConfig {
        clear_invalid: true,
        ..config()
    };
    let auth = memory_auth(config, &[("sess:abc123", ALICE)]).await;
    let valid = signed("abc123");

    for value in [
        valid.trim_start_matches("s:").to_string(),
        format!("x{valid}"),
        format!("S{}", &valid[1..]),
        "garbage".to_string(),
    ] {
        let decision = auth.authenticate(&request(&value)).await;
        assert_eq!(
            decision.outcome,
            Outcome::Unauthenticated { reason: "cookie" },
            "cookie {value:?}"
        );
        assert!(decision.clear_cookie.is_none(), "prefix mismatch never clears");
    }
}

// =========================================================================
// Signatures
// =========================================================================

#[tokio::test]
async fn test_tampered_signature_with_clear_invalid_emits_directive() {
    let config = AuthConfig {
        clear_invalid: true,
        ..config()
    };
    let auth = memory_auth(config, &[("sess:abc123", ALICE)]).await;
    let tampered = format!("{}x", signed("abc123"));

    let decision = auth.authenticate(&request(&tampered)).await;

    assert_eq!(
        decision.outcome,
        Outcome::Unauthenticated {
            reason: "Invalid cookie"
        }
    );
    assert_eq!(decision.clear_cookie, Some(ClearCookie { name: "sid".into() }));
}

#[tokio::test]
async fn test_tampered_signature_without_clear_invalid_emits_nothing() {
    let auth = memory_auth(config(), &[("sess:abc123", ALICE)]).await;

    let decision = auth.authenticate(&request("s:abc123.AAAA")).await;

    assert_eq!(
        decision.outcome,
        Outcome::Unauthenticated {
            reason: "Invalid cookie"
        }
    );
    assert!(decision.clear_cookie.is_none());
}

#[tokio::test]
async fn test_cookie_signed_with_other_secret_is_invalid() {
    let auth = memory_auth(config(), &[("sess:abc123", ALICE)]).await;
    let foreign = format!("s:{}", Signer::new("another secret").unwrap().sign("abc123"));

    let decision = auth.authenticate(&request(&foreign)).await;

    assert_eq!(
        decision.outcome,
        Outcome::Unauthenticated {
            reason: "Invalid cookie"
        }
    );
}

#[tokio::test]
async fn test_signature_failure_skips_store_lookup() {
    let store = Arc::new(RecordingStore::default());
    let auth = CookieAuthenticator::new(config(), Arc::clone(&store)).unwrap();

    auth.authenticate(&request("s:abc123.forged")).await;

    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

// =========================================================================
// Store lookups
// =========================================================================

#[tokio::test]
async fn test_valid_signature_store_miss_is_unauthenticated_not_server_error() {
    let auth = memory_auth(config(), &[]).await;

    let decision = auth.authenticate(&request(&signed("nobody"))).await;

    assert_eq!(decision.outcome, Outcome::Unauthenticated { reason: "cookie" });
}

#[tokio::test]
async fn test_lookup_uses_prefixed_key_exactly_once() {
    let store = Arc::new(RecordingStore::default());
    store.inner.insert("sess:abc123", ALICE).await;
    let auth = CookieAuthenticator::new(config(), Arc::clone(&store)).unwrap();

    let decision = auth.authenticate(&request(&signed("abc123"))).await;

    assert!(decision.outcome.is_authenticated());
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.last_key.lock().unwrap().as_deref(), Some("sess:abc123"));
}

#[tokio::test]
async fn test_store_connection_error_is_server_error() {
    let config = AuthConfig {
        redirect_to: Some("/login".into()),
        append_next: true.into(),
        ..config()
    };
    let auth = CookieAuthenticator::new(config, Arc::new(BrokenStore)).unwrap();

    let decision = auth.authenticate(&request(&signed("abc123"))).await;

    assert_eq!(
        decision.outcome,
        Outcome::ServerError {
            message: "Server error when checking authorization"
        }
    );
    assert!(decision.clear_cookie.is_none());
}

// =========================================================================
// Policy
// =========================================================================

#[tokio::test]
async fn test_anonymous_principal_is_unauthenticated() {
    let auth = memory_auth(
        config(),
        &[("sess:anon", r#"{"user":{"name":"Anonymous"}}"#)],
    )
    .await;

    let decision = auth.authenticate(&request(&signed("anon"))).await;

    assert_eq!(decision.outcome, Outcome::Unauthenticated { reason: "cookie" });
}

#[tokio::test]
async fn test_missing_principal_is_unauthenticated() {
    let auth = memory_auth(config(), &[("sess:empty", r#"{"cart":[]}"#)]).await;

    let decision = auth.authenticate(&request(&signed("empty"))).await;

    assert_eq!(decision.outcome, Outcome::Unauthenticated { reason: "cookie" });
}

#[tokio::test]
async fn test_valid_session_artifacts_equal_credentials() {
    let auth = memory_auth(config(), &[("sess:abc123", ALICE)]).await;

    let decision = auth.authenticate(&request(&signed("abc123"))).await;

    match decision.outcome {
        Outcome::Authenticated {
            artifacts,
            credentials,
        } => {
            assert_eq!(artifacts, credentials);
            assert_eq!(credentials.get("user").unwrap()["name"], "Alice");
            assert_eq!(credentials.get("user").unwrap()["id"], 7);
        }
        other => panic!("expected Authenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_quoted_percent_encoded_cookie_authenticates() {
    let auth = memory_auth(config(), &[("sess:abc123", ALICE)]).await;
    let header = format!(
        "theme=dark; sid=\"{}\"",
        urlencoding::encode(&signed("abc123"))
    );
    let req = IncomingRequest::from_cookie_header("/dashboard", &header);

    let decision = auth.authenticate(&req).await;

    assert!(decision.outcome.is_authenticated());
}

// =========================================================================
// Redirects
// =========================================================================

#[tokio::test]
async fn test_missing_cookie_redirects_with_next() {
    let config = AuthConfig {
        redirect_to: Some("/login".into()),
        append_next: true.into(),
        ..config()
    };
    let auth = memory_auth(config, &[]).await;

    let decision = auth.authenticate(&IncomingRequest::new("/dashboard")).await;

    assert_eq!(
        decision.outcome,
        Outcome::Redirect {
            target: "/login?next=%2Fdashboard".into(),
            body: "You are being redirected...",
        }
    );
}

#[tokio::test]
async fn test_invalid_signature_redirects_and_still_clears() {
    let config = AuthConfig {
        redirect_to: Some("/login".into()),
        append_next: AppendNext::Param("returnTo".into()),
        clear_invalid: true,
        ..config()
    };
    let auth = memory_auth(config, &[]).await;

    let decision = auth.authenticate(&request("s:abc123.forged")).await;

    assert!(matches!(
        &decision.outcome,
        Outcome::Redirect { target, .. } if target == "/login?returnTo=%2Fdashboard"
    ));
    assert_eq!(decision.clear_cookie, Some(ClearCookie { name: "sid".into() }));
}

#[tokio::test]
async fn test_malformed_record_with_redirect_is_server_error() {
    let config = AuthConfig {
        redirect_to: Some("/login".into()),
        append_next: true.into(),
        clear_invalid: true,
        ..config()
    };
    let auth = memory_auth(config, &[("sess:abc123", "[1]")]).await;

    let decision = auth.authenticate(&request(&signed("abc123"))).await;

    assert_eq!(
        decision.outcome,
        Outcome::ServerError {
            message: "Server error when checking authorization"
        }
    );
    assert!(decision.clear_cookie.is_none());
}

#[tokio::test]
async fn test_try_mode_without_redirect_on_try_returns_reason() {
    let config = AuthConfig {
        redirect_to: Some("/login".into()),
        redirect_on_try: false,
        ..config()
    };
    let auth = memory_auth(config, &[]).await;
    let req = IncomingRequest::new("/dashboard").with_mode(AuthMode::Try);

    let decision = auth.authenticate(&req).await;

    assert_eq!(decision.outcome, Outcome::Unauthenticated { reason: "cookie" });
}

// =========================================================================
// Cancellation and concurrency
// =========================================================================

#[tokio::test]
async fn test_cancel_during_store_lookup_is_server_error() {
    let auth = CookieAuthenticator::new(config(), Arc::new(HangingStore)).unwrap();
    let (cancel_tx, cancel_rx) = tokio::sync::oneshot::channel::<()>();

    let req = request(&signed("abc123"));
    let pending = auth.authenticate_or_abort(&req, async move {
        let _ = cancel_rx.await;
    });
    cancel_tx.send(()).unwrap();

    let decision = pending.await;

    assert!(matches!(decision.outcome, Outcome::ServerError { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_timeout_is_server_error_not_unauthenticated() {
    let auth = CookieAuthenticator::new(config(), Arc::new(HangingStore)).unwrap();

    let decision = auth
        .authenticate_or_abort(
            &request(&signed("abc123")),
            tokio::time::sleep(std::time::Duration::from_secs(5)),
        )
        .await;

    assert!(matches!(decision.outcome, Outcome::ServerError { .. }));
}

#[tokio::test]
async fn test_uncancelled_request_completes_normally() {
    let auth = memory_auth(config(), &[("sess:abc123", ALICE)]).await;

    let decision = auth
        .authenticate_or_abort(&request(&signed("abc123")), std::future::pending())
        .await;

    assert!(decision.outcome.is_authenticated());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_authenticator() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..16 {
        store
            .insert(format!("sess:s{i}"), format!(r#"{{"user":{{"name":"u{i}"}}}}"#))
            .await;
    }
    let auth = Arc::new(CookieAuthenticator::new(config(), store).unwrap());

    let mut handles = Vec::new();
    for i in 0..32 {
        let auth = Arc::clone(&auth);
        handles.push(tokio::spawn(async move {
            // Even IDs exist, odd ones are misses past the seeded range.
            let id = if i % 2 == 0 { format!("s{}", i / 2) } else { format!("s{}", 100 + i) };
            let decision = auth.authenticate(&request(&signed(&id))).await;
            (i, decision)
        }));
    }

    for handle in handles {
        let (i, decision) = handle.await.expect("task should not panic");
        if i % 2 == 0 {
            let user = decision.outcome.credentials().unwrap().get("user").unwrap().clone();
            assert_eq!(user["name"], format!("u{}", i / 2));
        } else {
            assert_eq!(decision.outcome, Outcome::Unauthenticated { reason: "cookie" });
        }
    }
}
