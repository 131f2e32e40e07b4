//! MongoDB connection management.

use mongodb::bson::doc;
use mongodb::{Client, Database};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::db::{DbConfig, DbError, DbResult};

/// Lazily-established, process-wide MongoDB connection.
///
/// Constructed by the entry point and shared through application state.
/// `connect` is idempotent: the first call dials and pings the server,
/// later (and concurrent) calls get the same handle.
pub struct MongoConnection {
    url: String,
    name: String,
    handle: OnceCell<(Client, Database)>,
}

impl MongoConnection {
    /// Create an unconnected manager. Does no I/O.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            handle: OnceCell::new(),
        }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        Self::new(config.url.clone(), config.name.clone())
    }

    /// Database name this manager connects to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Establish the connection on first call and return the database handle.
    pub async fn connect(&self) -> DbResult<Database> {
        let (_, database) = self.handle.get_or_try_init(|| self.establish()).await?;
        Ok(database.clone())
    }

    async fn establish(&self) -> DbResult<(Client, Database)> {
        debug!(database = %self.name, "Connecting to MongoDB");

        let client = Client::with_uri_str(&self.url)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        let database = client.database(&self.name);

        // Verify connection
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        info!(database = %self.name, "Connected to MongoDB");
        Ok((client, database))
    }

    /// The active database handle.
    ///
    /// Fails with `DbError::NotInitialized` if `connect` has not completed.
    pub fn database(&self) -> DbResult<Database> {
        self.handle
            .get()
            .map(|(_, database)| database.clone())
            .ok_or(DbError::NotInitialized)
    }

    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }

    /// Shut the client down. A no-op when never connected.
    pub async fn close(&self) {
        if let Some((client, _)) = self.handle.get() {
            client.clone().shutdown().await;
            info!(database = %self.name, "MongoDB connection closed");
        }
    }
}
