use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Document in the `users` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub external_id: String, // identity provider's `sub` claim, unique
    pub email: String,
    pub name: String,
    pub created_at: BsonDateTime,
}

impl User {
    pub fn new(external_id: String, email: String, name: String) -> Self {
        Self {
            id: None,
            external_id,
            email,
            name,
            created_at: BsonDateTime::now(),
        }
    }
}

/// Public view of a user returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
