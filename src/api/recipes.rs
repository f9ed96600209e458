use crate::models::recipe::{self, NewRecipe, RecipePatch, INVALID_DATA, RECIPE_NOT_FOUND};
use crate::state::AppState;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeCreatedResponse {
    pub message: String,
    /// 24 hex characters
    pub id: String,
}

fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}

// An id that cannot exist is reported the same way as one that does not.
fn parse_recipe_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::NotFound(RECIPE_NOT_FOUND.to_string()))
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "Recipes",
    responses(
        (status = 200, description = "All stored recipes, `_id` rendered as {\"$oid\": ...}")
    )
)]
pub async fn list_recipes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    log::info!("📖 GET /recipes");

    let recipes: Vec<Value> = state
        .recipes
        .find_all()
        .await?
        .into_iter()
        .map(recipe::to_json)
        .collect();

    Ok(HttpResponse::Ok().json(recipes))
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "The stored recipe"),
        (status = 404, description = "Recipe not found", body = crate::utils::ErrorResponse)
    )
)]
pub async fn get_recipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📖 GET /recipes/{}", path);

    let id = parse_recipe_id(&path)?;
    match state.recipes.find_by_id(id).await? {
        Some(found) => Ok(HttpResponse::Ok().json(recipe::to_json(found))),
        None => Err(AppError::NotFound(RECIPE_NOT_FOUND.to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "Recipes",
    responses(
        (status = 201, description = "Recipe added", body = RecipeCreatedResponse),
        (status = 400, description = "Body lacks `name` or `ingredients`", body = crate::utils::ErrorResponse)
    )
)]
pub async fn create_recipe(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new_recipe = NewRecipe::try_from(body.into_inner()).map_err(|e| {
        log::warn!("❌ POST /recipes rejected: {}", e);
        e
    })?;

    let id = state.recipes.insert(new_recipe.into_document()?).await?;
    log::info!("✅ Recipe added: {}", id);

    Ok(HttpResponse::Created().json(RecipeCreatedResponse {
        message: "Recipe added".to_string(),
        id: id.to_hex(),
    }))
}

#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe identifier")),
    request_body = Value,
    responses(
        (status = 200, description = "Recipe updated", body = MessageResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::utils::ErrorResponse),
        (status = 404, description = "Recipe not found", body = crate::utils::ErrorResponse)
    )
)]
pub async fn update_recipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    log::info!("✏️ PUT /recipes/{}", path);

    let id = parse_recipe_id(&path)?;

    // No body at all is the same as `{}`
    let patch = if body.iter().all(u8::is_ascii_whitespace) {
        RecipePatch::default()
    } else {
        let value: Value = serde_json::from_slice(&body)
            .map_err(|_| AppError::InvalidInput(INVALID_DATA.to_string()))?;
        RecipePatch::try_from(value)?
    };

    if state.recipes.update(id, patch.into_document()?).await? {
        log::info!("✅ Recipe updated: {}", id);
        Ok(HttpResponse::Ok().json(message("Recipe updated")))
    } else {
        Err(AppError::NotFound(RECIPE_NOT_FOUND.to_string()))
    }
}

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponse),
        (status = 404, description = "Recipe not found", body = crate::utils::ErrorResponse)
    )
)]
pub async fn delete_recipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️ DELETE /recipes/{}", path);

    let id = parse_recipe_id(&path)?;
    if state.recipes.delete(id).await? {
        log::info!("✅ Recipe deleted: {}", id);
        Ok(HttpResponse::Ok().json(message("Recipe deleted")))
    } else {
        Err(AppError::NotFound(RECIPE_NOT_FOUND.to_string()))
    }
}
