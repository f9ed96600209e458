use crate::services::google::IdentityVerifier;
use crate::services::session::SessionTokens;
use crate::store::{RecipeStore, UserStore};
use std::sync::Arc;

/// Everything a handler needs, built once in `main` and shared as `web::Data`.
pub struct AppState {
    pub recipes: Arc<dyn RecipeStore>,
    pub users: Arc<dyn UserStore>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub sessions: SessionTokens,
}
