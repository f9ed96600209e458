use crate::models::{User, UserProfile};
use crate::services::session::Claims;
use crate::state::AppState;
use crate::utils::AppError;
use serde::{Deserialize, Serialize};

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GoogleLoginRequest {
    /// Google ID token obtained by the client.
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CurrentUserResponse {
    pub user: UserProfile,
}

/// Verifies a Google ID token, creates the user on first sight and issues a
/// session token for it.
pub async fn login_with_google(
    state: &AppState,
    identity_token: &str,
) -> Result<LoginResponse, AppError> {
    let identity = state.verifier.verify(identity_token).await?;

    let user = match state.users.find_by_external_id(&identity.subject_id).await? {
        Some(existing) => existing,
        None => {
            log::info!("✅ Creating user for subject: {}", identity.subject_id);
            state
                .users
                .insert_if_absent(User::new(identity.subject_id, identity.email, identity.name))
                .await?
        }
    };

    let token = state.sessions.issue(&user.external_id)?;

    Ok(LoginResponse {
        token,
        user: UserProfile::from(&user),
    })
}

pub async fn current_user(state: &AppState, claims: &Claims) -> Result<UserProfile, AppError> {
    state
        .users
        .find_by_external_id(&claims.sub)
        .await?
        .map(|user| UserProfile::from(&user))
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
