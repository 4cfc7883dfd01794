//! Slack signing-secret verification.
//!
//! Slack signs every Events API request with
//! `v0=hex(HMAC-SHA256(secret, "v0:{timestamp}:{body}"))` and sends the result in
//! `X-Slack-Signature`, alongside `X-Slack-Request-Timestamp`.

use std::fmt;

use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use time::OffsetDateTime;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";
pub const RETRY_NUM_HEADER: &str = "x-slack-retry-num";

/// Maximum clock difference accepted between Slack and us, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

const VERSION: &str = "v0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing header {0}")]
    MissingHeader(&'static str),
    #[error("invalid request timestamp")]
    InvalidTimestamp,
    #[error("request timestamp {timestamp} outside tolerance (now {now})")]
    Stale { timestamp: i64, now: i64 },
    #[error("signature mismatch")]
    Mismatch,
}

impl SignatureError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            SignatureError::MissingHeader(_) => "missing_header",
            SignatureError::InvalidTimestamp => "invalid_timestamp",
            SignatureError::Stale { .. } => "stale",
            SignatureError::Mismatch => "bad_signature",
        }
    }
}

#[derive(Clone)]
pub struct SlackVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl fmt::Debug for SlackVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackVerifier")
            .field("secret", &"<redacted>")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

impl SlackVerifier {
    pub fn new(secret: impl Into<String>, tolerance_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs,
        }
    }

    pub fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
        self.verify_at(headers, body, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Verifies a request against an explicit `now` (unix seconds).
    ///
    /// Timestamps too far in the past or the future are both rejected.
    pub fn verify_at(&self, headers: &HeaderMap, body: &[u8], now: i64) -> Result<(), SignatureError> {
        let timestamp = header(headers, TIMESTAMP_HEADER)?;
        let signature = header(headers, SIGNATURE_HEADER)?;

        let ts: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::InvalidTimestamp)?;
        if now.abs_diff(ts) > self.tolerance_secs.unsigned_abs() {
            return Err(SignatureError::Stale { timestamp: ts, now });
        }

        let expected = compute(&self.secret, timestamp.trim(), body);
        if expected.as_bytes().ct_eq(signature.trim().as_bytes()).into() {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

/// Produces the `X-Slack-Signature` value Slack would send for `body` at `timestamp`.
///
/// ```
/// let sig = security::sign("secret", 1_700_000_000, b"{}");
/// assert!(sig.starts_with("v0="));
/// assert_eq!(sig.len(), 3 + 64);
/// ```
pub fn sign(secret: &str, timestamp: i64, body: &[u8]) -> String {
    compute(secret, &timestamp.to_string(), body)
}

fn compute(secret: &str, timestamp: &str, body: &[u8]) -> String {
    // HMAC accepts keys of any length.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(VERSION.as_bytes());
    mac.update(b":");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    format!("{VERSION}={}", hex::encode(mac.finalize().into_bytes()))
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .ok_or(SignatureError::MissingHeader(name))
}
