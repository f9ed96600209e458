use crate::utils::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Identity asserted by a verified third-party token.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityClaims {
    pub subject_id: String,
    pub email: String,
    pub name: String,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, identity_token: &str) -> Result<IdentityClaims, AppError>;
}

/// Verifies Google ID tokens against the `tokeninfo` endpoint.
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
    client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    aud: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenInfoError {
    error: Option<String>,
    error_description: Option<String>,
}

impl GoogleTokenVerifier {
    pub fn new(
        tokeninfo_url: String,
        client_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            tokeninfo_url,
            client_id,
        })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, identity_token: &str) -> Result<IdentityClaims, AppError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", identity_token)])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        let info: TokenInfo = serde_json::from_slice(&body).map_err(|e| {
            AppError::Internal(format!("Failed to parse tokeninfo response: {}", e))
        })?;

        claims_from_token_info(info, self.client_id.as_deref())
    }
}

// Only a 4xx says the token itself is bad; anything else is an outage.
fn rejection(status: reqwest::StatusCode, body: &[u8]) -> AppError {
    if status.is_client_error() {
        log::warn!("❌ Google rejected identity token ({})", status);
        AppError::InvalidToken(provider_error_message(body))
    } else {
        log::error!("❌ Google tokeninfo unavailable ({})", status);
        AppError::Internal(format!("tokeninfo returned {}", status))
    }
}

fn provider_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<TokenInfoError>(body)
        .ok()
        .and_then(|e| e.error_description.or(e.error))
        .unwrap_or_else(|| "Invalid identity token".to_string())
}

fn claims_from_token_info(
    info: TokenInfo,
    expected_audience: Option<&str>,
) -> Result<IdentityClaims, AppError> {
    if let Some(expected) = expected_audience {
        if info.aud.as_deref() != Some(expected) {
            return Err(AppError::InvalidToken(
                "Token was issued for another client".to_string(),
            ));
        }
    }

    let email = info
        .email
        .ok_or_else(|| AppError::InvalidToken("Token has no email claim".to_string()))?;

    Ok(IdentityClaims {
        subject_id: info.sub,
        email,
        name: info.name.unwrap_or_default(),
    })
}
