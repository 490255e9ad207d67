//! Credential handling: password hashing and signed session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::models::User;

/// Token payload: who the caller is and whether they are an admin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "_id")]
    pub user_id: Uuid,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, is_admin: bool, expiry_secs: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::seconds(expiry_secs as i64)).timestamp();

        Self {
            user_id,
            is_admin,
            iat: now.timestamp(),
            exp,
        }
    }

    pub fn for_user(user: &User, security: &SecurityConfig) -> Self {
        Self::new(user.id, user.is_admin, security.token_expiry_secs)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT private key is not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

pub fn generate_token(claims: &Claims, security: &SecurityConfig) -> Result<String, TokenError> {
    let secret = &security.jwt_private_key;

    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify signature and expiry; no revocation list is consulted
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    let secret = &security.jwt_private_key;

    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::Invalid(e.to_string()))
}

/// Salted bcrypt hash; the cost comes from configuration
pub fn hash_password(password: &str, security: &SecurityConfig) -> Result<String, PasswordError> {
    Ok(bcrypt::hash(password, security.bcrypt_cost)?)
}

/// bcrypt compares digests in constant time; a corrupt hash never verifies
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
