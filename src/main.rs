mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod state;
mod store;
#[cfg(test)]
mod testing;
mod utils;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::services::google::GoogleTokenVerifier;
use crate::services::session::SessionTokens;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;

    log::info!("🚀 Starting Recipe Service...");

    let db = database::MongoDB::new(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            io::Error::other(e)
        })?;
    let db = Arc::new(db);

    let verifier = GoogleTokenVerifier::new(
        config.google_tokeninfo_url.clone(),
        config.google_client_id.clone(),
        config.identity_timeout,
    )
    .map_err(io::Error::other)?;

    if config.google_client_id.is_none() {
        log::warn!("⚠️  GOOGLE_CLIENT_ID is not set, identity token audience will not be checked");
    }

    let state = web::Data::new(AppState {
        recipes: db.clone(),
        users: db,
        verifier: Arc::new(verifier),
        sessions: SessionTokens::new(&config.jwt_secret, config.session_ttl),
    });

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let allowed_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&allowed_origins))
            .wrap(middleware::SecurityHeaders)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::swagger::ApiDoc::openapi()),
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// `*` in the origin list opens the API to any origin.
fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::CONTENT_TYPE])
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == "*") {
        cors.allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
