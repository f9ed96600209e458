//! In-memory stand-ins for MongoDB and Google used by the HTTP tests.

use crate::models::User;
use crate::services::google::{IdentityClaims, IdentityVerifier};
use crate::services::session::SessionTokens;
use crate::state::AppState;
use crate::store::{RecipeStore, UserStore};
use crate::utils::AppError;
use actix_web::web;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const TEST_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct MemoryRecipes {
    docs: RwLock<Vec<Document>>,
}

impl MemoryRecipes {
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }
}

// `$set` semantics: a dotted key names a nested field.
fn set_path(doc: &mut Document, path: &str, value: Bson) {
    match path.split_once('.') {
        Some((head, rest)) => {
            if !matches!(doc.get(head), Some(Bson::Document(_))) {
                doc.insert(head, Document::new());
            }
            if let Some(Bson::Document(inner)) = doc.get_mut(head) {
                set_path(inner, rest, value);
            }
        }
        None => {
            doc.insert(path, value);
        }
    }
}

fn has_id(doc: &Document, id: ObjectId) -> bool {
    doc.get_object_id("_id").map(|stored| stored == id).unwrap_or(false)
}

#[async_trait]
impl RecipeStore for MemoryRecipes {
    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        Ok(self.docs.read().await.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        Ok(self.docs.read().await.iter().find(|doc| has_id(doc, id)).cloned())
    }

    async fn insert(&self, recipe: Document) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        let mut stored = Document::new();
        stored.insert("_id", id);
        for (key, value) in recipe {
            stored.insert(key, value);
        }

        self.docs.write().await.push(stored);
        Ok(id)
    }

    async fn update(&self, id: ObjectId, fields: Document) -> Result<bool, AppError> {
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|doc| has_id(doc, id)) {
            Some(doc) => {
                for (key, value) in fields {
                    set_path(doc, &key, value);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut docs = self.docs.write().await;
        match docs.iter().position(|doc| has_id(doc, id)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    users: RwLock<Vec<User>>,
}

impl MemoryUsers {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.external_id == external_id)
            .cloned())
    }

    async fn insert_if_absent(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if let Some(existing) = users.iter().find(|u| u.external_id == user.external_id) {
            return Ok(existing.clone());
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }
}

/// Accepts a fixed set of identity tokens and rejects everything else the
/// way Google's `tokeninfo` does.
#[derive(Default)]
pub struct StaticVerifier {
    identities: HashMap<String, IdentityClaims>,
}

impl StaticVerifier {
    pub fn with_identity(mut self, token: &str, subject_id: &str, email: &str, name: &str) -> Self {
        self.identities.insert(
            token.to_string(),
            IdentityClaims {
                subject_id: subject_id.to_string(),
                email: email.to_string(),
                name: name.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn verify(&self, identity_token: &str) -> Result<IdentityClaims, AppError> {
        self.identities
            .get(identity_token)
            .cloned()
            .ok_or_else(|| AppError::InvalidToken("Invalid Value".to_string()))
    }
}

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub recipes: Arc<MemoryRecipes>,
    pub users: Arc<MemoryUsers>,
}

pub fn test_context(verifier: StaticVerifier) -> TestContext {
    let recipes = Arc::new(MemoryRecipes::default());
    let users = Arc::new(MemoryUsers::default());

    let state = web::Data::new(AppState {
        recipes: recipes.clone(),
        users: users.clone(),
        verifier: Arc::new(verifier),
        sessions: SessionTokens::new(TEST_SECRET, chrono::Duration::hours(24)),
    });

    TestContext {
        state,
        recipes,
        users,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_memory_update_follows_dotted_paths() {
        let recipes = MemoryRecipes::default();
        let id = recipes
            .insert(doc! { "name": "Soup", "meta": { "serves": 2, "vegan": true } })
            .await
            .unwrap();

        assert!(recipes
            .update(id, doc! { "meta.serves": 4, "notes.source": "grandma" })
            .await
            .unwrap());

        let stored = recipes.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(
            stored.get_document("meta").unwrap(),
            &doc! { "serves": 4, "vegan": true }
        );
        assert_eq!(
            stored.get_document("notes").unwrap(),
            &doc! { "source": "grandma" }
        );
        assert!(!stored.contains_key("meta.serves"));
    }
}
