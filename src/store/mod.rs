//! Persistence seams used by the handlers.
//!
//! `database::MongoDB` implements both traits in production; tests wire the
//! router to in-memory stores instead.

use crate::models::User;
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

pub const RECIPES: &str = "recipes";
pub const USERS: &str = "users";

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Document>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, AppError>;

    /// Stores `recipe` under a freshly generated identifier and returns it.
    async fn insert(&self, recipe: Document) -> Result<ObjectId, AppError>;

    /// Overwrites the given fields, leaving the others untouched.
    /// Returns whether a recipe with `id` exists.
    async fn update(&self, id: ObjectId, fields: Document) -> Result<bool, AppError>;

    /// Returns whether a recipe was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, AppError>;

    /// Creates `user` unless one with the same `external_id` already exists,
    /// and returns whichever record is stored.
    async fn insert_if_absent(&self, user: User) -> Result<User, AppError>;
}
