use crate::utils::AppError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user's external_id
    pub iat: i64,    // issued at
    pub exp: i64,    // expiration
    pub jti: String, // JWT ID
}

/// Issues and checks the stateless HS256 session tokens.
///
/// Nothing is persisted, so a token stays usable until `exp` even if the
/// user signs out.
#[derive(Clone)]
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, Utc::now())
    }

    pub(crate) fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: issued_at
                .checked_add_signed(self.ttl)
                .ok_or_else(|| AppError::Internal("session expiry is out of range".to_string()))?
                .timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AppError::TokenSigning)
    }

    /// Expiry is checked before the signature, so a stale token is reported
    /// as expired even when it was signed with another key.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut unverified = Validation::new(Algorithm::HS256);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;

        let peeked = decode::<Claims>(token, &self.decoding, &unverified)
            .map_err(|_| AppError::InvalidCredential)?;
        if peeked.claims.exp <= Utc::now().timestamp() {
            return Err(AppError::ExpiredCredential);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::ExpiredCredential,
                _ => AppError::InvalidCredential,
            })
    }
}
