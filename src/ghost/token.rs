//! Short-lived admin tokens for the Ghost Admin API.
//!
//! An admin key has the form `<key_id>:<hex secret>`. Each token is an HS256
//! JWT whose header carries the key id and whose claims expire five minutes
//! after issuance. Build a new token for every outbound request.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const TOKEN_TTL_SECS: u64 = 5 * 60;
pub const ADMIN_AUDIENCE: &str = "/admin/";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed admin api key: {0}")]
    MalformedCredential(String),
}

impl TokenError {
    fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedCredential(message.into())
    }
}

/// Key id and decoded secret split out of an `id:secret` admin key.
#[derive(Clone)]
pub struct CredentialPair {
    key_id: String,
    secret: Vec<u8>,
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

// Field order is the serialized order and the signature covers those bytes.
#[derive(Serialize)]
struct Header<'a> {
    alg: &'static str,
    kid: &'a str,
    typ: &'static str,
}

#[derive(Serialize)]
struct Claims {
    iat: u64,
    exp: u64,
    aud: &'static str,
}

impl CredentialPair {
    /// Splits on the first colon and hex-decodes the secret.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let Some((key_id, hex_secret)) = raw.split_once(':') else {
            return Err(TokenError::malformed("expected <id>:<secret>"));
        };
        if key_id.is_empty() {
            return Err(TokenError::malformed("key id must not be empty"));
        }
        if hex_secret.is_empty() {
            return Err(TokenError::malformed("secret must not be empty"));
        }
        let secret = hex::decode(hex_secret)
            .map_err(|err| TokenError::malformed(format!("secret is not valid hex: {err}")))?;
        Ok(Self {
            key_id: key_id.to_string(),
            secret,
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Signs a token issued at `issued_at` (unix seconds).
    pub fn sign_at(&self, issued_at: u64) -> Result<String, TokenError> {
        let header = Header {
            alg: "HS256",
            kid: &self.key_id,
            typ: "JWT",
        };
        let claims = Claims {
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
            aud: ADMIN_AUDIENCE,
        };

        let header_b64 = encode_segment(&header)?;
        let claims_b64 = encode_segment(&claims)?;
        let signing_input = format!("{header_b64}.{claims_b64}");

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| TokenError::malformed(format!("invalid signing key: {err}")))?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    pub fn sign_now(&self) -> Result<String, TokenError> {
        self.sign_at(unix_now())
    }
}

/// Builds a fresh admin token from an `id:secret` key using the wall clock.
pub fn build_token(admin_api_key: &str) -> Result<String, TokenError> {
    CredentialPair::parse(admin_api_key)?.sign_now()
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let bytes = serde_json::to_vec(value)
        .map_err(|err| TokenError::malformed(format!("failed to encode token segment: {err}")))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
