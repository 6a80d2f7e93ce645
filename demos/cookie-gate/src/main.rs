use std::sync::Arc;

use cookiegate::prelude::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const CONFIG: &str = r#"{
    "cookieName": "sid",
    "secret": "demo secret, replace me",
    "clearInvalid": true,
    "redirectTo": "/login",
    "appendNext": true
}"#;

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let sessions = [
        ("sess:alice", json!({ "user": { "name": "Alice", "roles": ["admin"] } })),
        ("sess:guest", json!({ "user": { "name": "Anonymous" } })),
        ("sess:broken", json!({ "cart": [] })),
    ];
    for (key, record) in sessions {
        store.insert(key, record.to_string()).await;
    }
    store
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn describe(decision: &Decision) -> String {
    let mut line = match &decision.outcome {
        Outcome::Authenticated { credentials, .. } => {
            let name = credentials
                .get("user")
                .and_then(|u| u.get("name"))
                .and_then(|n| n.as_str())
                .unwrap_or("?");
            format!("200 authenticated as {name}")
        }
        Outcome::Unauthenticated { reason } => format!("401 {reason}"),
        Outcome::Redirect { target, body } => format!("302 {target} ({body})"),
        Outcome::ServerError { message } => format!("500 {message}"),
    };
    if let Some(clear) = &decision.clear_cookie {
        line.push_str(&format!(" + clear cookie '{}'", clear.name));
    }
    line
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), CookiegateError> {
    init_tracing();

    let auth = CookieGate::from_json(CONFIG, seeded_store().await)?;
    let signer = auth.signer().clone();

    let alice = format!("s:{}", signer.sign("alice"));
    let cases = [
        ("valid session", format!("sid={alice}")),
        ("no cookie", "lang=en".to_string()),
        ("unsigned value", "sid=alice".to_string()),
        ("forged signature", format!("sid={alice}x")),
        ("logged-out session", format!("sid=s:{}", signer.sign("guest"))),
        ("no principal", format!("sid=s:{}", signer.sign("broken"))),
        ("expired session", format!("sid=s:{}", signer.sign("gone"))),
    ];

    for (label, header) in cases {
        let request = IncomingRequest::from_cookie_header("/dashboard", &header);
        let decision = auth.authenticate(&request).await;
        tracing::debug!(case = label, "decided");
        println!("{label:>20}: {}", describe(&decision));
    }

    Ok(())
}
