use super::MongoDB;
use crate::store::{RecipeStore, RECIPES};
use crate::utils::AppError;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

#[async_trait]
impl RecipeStore for MongoDB {
    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        let cursor = self.collection::<Document>(RECIPES).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        Ok(self
            .collection::<Document>(RECIPES)
            .find_one(doc! { "_id": id })
            .await?)
    }

    async fn insert(&self, mut recipe: Document) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        recipe.insert("_id", id);

        self.collection::<Document>(RECIPES)
            .insert_one(recipe)
            .await?;

        Ok(id)
    }

    async fn update(&self, id: ObjectId, fields: Document) -> Result<bool, AppError> {
        let collection = self.collection::<Document>(RECIPES);

        // MongoDB rejects an empty `$set`
        if fields.is_empty() {
            log::debug!("Empty update for recipe {}", id);
            let count = collection.count_documents(doc! { "_id": id }).await?;
            return Ok(count > 0);
        }

        let result = collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection::<Document>(RECIPES)
            .delete_one(doc! { "_id": id })
            .await?;

        Ok(result.deleted_count > 0)
    }
}
