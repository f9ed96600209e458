use super::MongoDB;
use crate::models::User;
use crate::store::{UserStore, USERS};
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "external_id": external_id })
            .await?)
    }

    async fn insert_if_absent(&self, user: User) -> Result<User, AppError> {
        // Upsert keeps concurrent first logins down to a single record
        let stored = self
            .collection::<User>(USERS)
            .find_one_and_update(
                doc! { "external_id": &user.external_id },
                doc! {
                    "$setOnInsert": {
                        "email": &user.email,
                        "name": &user.name,
                        "created_at": user.created_at,
                    }
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        stored.ok_or_else(|| {
            AppError::Internal(format!("upsert returned no user for {}", user.external_id))
        })
    }
}
