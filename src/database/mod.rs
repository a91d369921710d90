use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .unwrap_or("points_service");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the read paths depend on.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // users(open_id) - identity lookups for the admin gate
        let users = self.database().collection::<mongodb::bson::Document>("users");

        let users_open_id_index = IndexModel::builder()
            .keys(doc! { "open_id": 1 })
            .build();

        match users.create_index(users_open_id_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(open_id)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // users(total_points desc) - leaderboard sort
        let users_points_index = IndexModel::builder()
            .keys(doc! { "total_points": -1 })
            .build();

        match users.create_index(users_points_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(total_points)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // follows(follower_open_id, following_open_id) - edge existence check
        let follows = self.database().collection::<mongodb::bson::Document>("follows");

        let follows_index = IndexModel::builder()
            .keys(doc! { "follower_open_id": 1, "following_open_id": 1 })
            .build();

        match follows.create_index(follows_index).await {
            Ok(_) => log::info!("   ✅ Index created: follows(follower, following)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // announcements(created_at desc) - recency-ordered listing
        let announcements = self
            .database()
            .collection::<mongodb::bson::Document>("announcements");

        let announcements_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .build();

        match announcements.create_index(announcements_index).await {
            Ok(_) => log::info!("   ✅ Index created: announcements(created_at)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
