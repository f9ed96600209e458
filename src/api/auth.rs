use crate::services::auth_service::{
    self, CurrentUserResponse, GoogleLoginRequest, LoginResponse,
};
use crate::services::session::Claims;
use crate::state::AppState;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};

#[utoipa::path(
    post,
    path = "/auth/google",
    tag = "Auth",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Google rejected the identity token", body = crate::utils::ErrorResponse)
    )
)]
pub async fn google_login(
    state: web::Data<AppState>,
    request: web::Json<GoogleLoginRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /auth/google");

    match auth_service::login_with_google(&state, &request.token).await {
        Ok(response) => {
            log::info!("✅ Google login successful: {}", response.user.email);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            log::warn!("❌ Google login failed: {}", e);
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed-in user", body = CurrentUserResponse),
        (status = 403, description = "Missing, expired or invalid session token", body = crate::utils::ErrorResponse),
        (status = 404, description = "User not found", body = crate::utils::ErrorResponse)
    ),
    security(
        ("session_token" = [])
    )
)]
pub async fn get_current_user(
    state: web::Data<AppState>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /user - {}", claims.sub);

    let user = auth_service::current_user(&state, &claims).await?;
    Ok(HttpResponse::Ok().json(CurrentUserResponse { user }))
}
