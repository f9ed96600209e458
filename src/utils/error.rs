use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every failure a handler can surface to a client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    /// The identity provider rejected the token presented at login.
    #[error("{0}")]
    InvalidToken(String),
    #[error("Missing authorization token")]
    MissingCredential,
    #[error("Session token has expired")]
    ExpiredCredential,
    #[error("Invalid session token")]
    InvalidCredential,
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Identity provider error: {0}")]
    IdentityProvider(#[from] reqwest::Error),
    #[error("Failed to sign session token: {0}")]
    TokenSigning(jsonwebtoken::errors::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::InvalidToken(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingCredential
            | AppError::ExpiredCredential
            | AppError::InvalidCredential => StatusCode::FORBIDDEN,
            AppError::Database(_)
            | AppError::IdentityProvider(_)
            | AppError::TokenSigning(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = if status.is_server_error() {
            log::error!("❌ {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse { error })
    }
}
