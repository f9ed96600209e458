use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Service API",
        version = "1.0.0",
        description = "Recipe CRUD backed by MongoDB, with Google sign-in.\n\n**Authentication:** `POST /auth/google` exchanges a Google ID token for a session token. Send it as the raw `Authorization` header value (a `Bearer ` prefix is also accepted)."
    ),
    paths(
        // Recipes
        crate::api::recipes::list_recipes,
        crate::api::recipes::get_recipe,
        crate::api::recipes::create_recipe,
        crate::api::recipes::update_recipe,
        crate::api::recipes::delete_recipe,

        // Auth
        crate::api::auth::google_login,
        crate::api::auth::get_current_user,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::api::recipes::MessageResponse,
            crate::api::recipes::RecipeCreatedResponse,
            crate::services::auth_service::GoogleLoginRequest,
            crate::services::auth_service::LoginResponse,
            crate::services::auth_service::CurrentUserResponse,
            crate::models::UserProfile,
            crate::utils::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Recipes", description = "Create, read, update and delete recipes."),
        (name = "Auth", description = "Google sign-in and the signed-in user."),
        (name = "Health", description = "Service health check."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Session token returned by POST /auth/google",
                ))),
            );
        }
    }
}
