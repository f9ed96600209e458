mod recipes;
mod users;

use crate::store::USERS;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

const DEFAULT_DATABASE: &str = "recipeDB";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> mongodb::error::Result<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("✅ Connected to MongoDB database: {}", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// `users.external_id` is the login lookup key and must stay unique.
    async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        use mongodb::bson::doc;

        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS);
        let external_id_index = IndexModel::builder()
            .keys(doc! { "external_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(external_id_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(external_id) unique"),
            Err(e) => {
                log::error!("   ❌ Failed to create users(external_id) index: {}", e);
                return Err(e);
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

#[cfg(test)]
impl MongoDB {
    /// A throwaway database on the server named by `MONGODB_TEST_URI`.
    pub(crate) async fn scratch() -> Self {
        dotenv::dotenv().ok();
        let _ = env_logger::builder().is_test(true).try_init();

        let server = std::env::var("MONGODB_TEST_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let uri = format!(
            "{}/recipe_service_test_{}",
            server.trim_end_matches('/'),
            uuid::Uuid::new_v4().simple()
        );

        Self::new(&uri).await.unwrap()
    }

    pub(crate) async fn drop_database(self) {
        self.db.drop().await.unwrap();
    }
}
