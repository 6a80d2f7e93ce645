//! Cookie decoding and signing for cookiegate.
//!
//! This crate turns the raw string a browser sent into something the
//! authenticator can trust:
//!
//! - **Cookie decoding** ([`decode`], [`find_cookie`]) — percent-decoding,
//!   trimming, quote stripping, and `Cookie:` header parsing.
//! - **Signatures** ([`Signer`]) — HMAC-SHA256 signing and constant-time
//!   verification of `value.signature` payloads.
//! - **Errors** ([`CodecError`]) — what can go wrong on the way.
//!
//! # Architecture
//!
//! The codec layer sits between the request (raw header text) and the
//! session layer (store lookups and policy). It never performs I/O.
//!
//! ```text
//! Request (raw cookie) → Codec (SessionId) → Session (store + policy)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod cookie;
mod error;
mod signature;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use cookie::{DecodedCookie, decode, find_cookie, parse_cookie_header};
pub use error::CodecError;
pub use signature::{DEFAULT_VALUE_PREFIX, SessionId, Signer};
