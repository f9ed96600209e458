pub mod auth;
pub mod health;
pub mod recipes;
pub mod swagger;

use crate::middleware::SessionAuth;
use crate::models::recipe::INVALID_DATA;
use crate::utils::AppError;
use actix_web::web;

/// Registers every route on the app; `main` and the HTTP tests share it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("❌ Rejected JSON body: {}", err);
        AppError::InvalidInput(INVALID_DATA.to_string()).into()
    }))
    // Health check
    .route("/health", web::get().to(health::health_check))
    // Recipes
    .service(
        web::scope("/recipes")
            .route("", web::get().to(recipes::list_recipes))
            .route("", web::post().to(recipes::create_recipe))
            .route("/{id}", web::get().to(recipes::get_recipe))
            .route("/{id}", web::put().to(recipes::update_recipe))
            .route("/{id}", web::delete().to(recipes::delete_recipe)),
    )
    // Auth
    .route("/auth/google", web::post().to(auth::google_login))
    .service(
        web::resource("/user")
            .wrap(SessionAuth)
            .route(web::get().to(auth::get_current_user)),
    );
}
