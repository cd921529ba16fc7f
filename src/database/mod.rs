use crate::models::Product;
use mongodb::bson::doc;
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::time::Duration;

const DEFAULT_DB_NAME: &str = "simple_application";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    /// Opens the client, checks connectivity and ensures indexes.
    ///
    /// No retry: the caller decides what to do with a failure.
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(1);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let products = self.collection::<Product>(Product::COLLECTION);
        for index in Product::indexes() {
            create_index(&products, index, "products(name) unique").await?;
        }

        log::info!("✅ Database indexes ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn name(&self) -> &str {
        self.db.name()
    }
}

async fn create_index<T: Send + Sync>(
    collection: &Collection<T>,
    index: IndexModel,
    label: &str,
) -> Result<(), mongodb::error::Error> {
    match collection.create_index(index).await {
        Ok(_) => {
            log::info!("   ✅ Index created: {}", label);
            Ok(())
        }
        // An index with the same keys but other options already exists.
        Err(e) if is_index_conflict(&e) => {
            log::debug!("   ℹ️  Index already exists: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn is_index_conflict(err: &mongodb::error::Error) -> bool {
    // IndexOptionsConflict / IndexKeySpecsConflict
    matches!(err.kind.as_ref(), ErrorKind::Command(c) if c.code == 85 || c.code == 86)
}
