//! Identity-provider webhooks: Svix signature verification and user event parsing.

use axum::http::HeaderMap;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::types::{IdentityEvent, User};
use crate::error::PrdServiceError;

type HmacSha256 = Hmac<Sha256>;

/// Accepted clock skew between the sender's timestamp and ours.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 5 * 60;

/// The three `svix-*` headers that accompany every delivery.
#[derive(Debug, Clone)]
pub struct SvixHeaders {
    pub id: String,
    pub timestamp: String,
    pub signature: String,
}

impl SvixHeaders {
    pub fn from_header_map(headers: &HeaderMap) -> Option<Self> {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        Some(Self {
            id: get("svix-id")?,
            timestamp: get("svix-timestamp")?,
            signature: get("svix-signature")?,
        })
    }
}

#[derive(Clone)]
pub struct SvixVerifier {
    mac: HmacSha256,
}

impl SvixVerifier {
    /// Build from a `whsec_`-prefixed, base64-encoded signing secret.
    pub fn new(secret: &str) -> Result<Self, PrdServiceError> {
        let encoded = secret.strip_prefix("whsec_").unwrap_or(secret);
        let key = BASE64.decode(encoded).map_err(|_| {
            PrdServiceError::Configuration("IDENTITY_WEBHOOK_SECRET is not valid base64".into())
        })?;
        let mac = HmacSha256::new_from_slice(&key).map_err(|_| {
            PrdServiceError::Configuration("IDENTITY_WEBHOOK_SECRET has an unusable length".into())
        })?;
        Ok(Self { mac })
    }

    /// Raw HMAC-SHA256 over `{id}.{timestamp}.{body}`.
    fn sign(&self, id: &str, timestamp: &str, body: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }

    /// `svix-signature` header value for a delivery, as the sender would produce it.
    pub fn signature_header(&self, id: &str, timestamp: &str, body: &[u8]) -> String {
        format!("v1,{}", BASE64.encode(self.sign(id, timestamp, body)))
    }

    /// Check the timestamp window and that any `v1` signature matches.
    #[must_use]
    pub fn verify(&self, headers: &SvixHeaders, body: &[u8], now: DateTime<Utc>) -> bool {
        let Ok(sent_at) = headers.timestamp.trim().parse::<i64>() else {
            return false;
        };
        let skew = now.timestamp().checked_sub(sent_at).map(i64::unsigned_abs);
        if !matches!(skew, Some(secs) if secs <= SIGNATURE_TOLERANCE_SECS.unsigned_abs()) {
            return false;
        }

        let expected = self.sign(&headers.id, &headers.timestamp, body);
        headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == "v1")
            .filter_map(|(_, sig)| BASE64.decode(sig).ok())
            .any(|candidate| bool::from(expected.as_slice().ct_eq(&candidate)))
    }
}

// ── Event payloads ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct UserPayload {
    id: String,
    #[serde(default)]
    email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    primary_email_address_id: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

#[derive(Deserialize)]
struct EmailAddress {
    #[serde(default)]
    id: Option<String>,
    email_address: String,
}

#[derive(Deserialize)]
struct DeletedPayload {
    id: Option<String>,
}

/// Decode a verified webhook body into an [`IdentityEvent`].
pub fn parse_identity_event(body: &[u8]) -> Result<IdentityEvent, PrdServiceError> {
    let invalid = |e: serde_json::Error| PrdServiceError::InvalidInput(e.to_string());
    let envelope: Envelope = serde_json::from_slice(body).map_err(invalid)?;

    match envelope.event_type.as_str() {
        "user.created" | "user.updated" => {
            let payload: UserPayload = serde_json::from_value(envelope.data).map_err(invalid)?;
            let primary = payload.primary_email_address_id.as_deref();
            let email = payload
                .email_addresses
                .iter()
                .find(|e| primary.is_some() && e.id.as_deref() == primary)
                .or_else(|| payload.email_addresses.first())
                .map(|e| e.email_address.clone())
                .ok_or_else(|| {
                    PrdServiceError::InvalidInput("user event carries no email address".into())
                })?;
            Ok(IdentityEvent::Upsert(User {
                id: payload.id,
                email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                image_url: payload.image_url,
            }))
        }
        "user.deleted" => {
            let payload: DeletedPayload = serde_json::from_value(envelope.data).map_err(invalid)?;
            let user_id = payload.id.ok_or_else(|| {
                PrdServiceError::InvalidInput("user.deleted event carries no id".into())
            })?;
            Ok(IdentityEvent::Delete { user_id })
        }
        _ => Ok(IdentityEvent::Ignored {
            event_type: envelope.event_type,
        }),
    }
}
