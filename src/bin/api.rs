//! Todo API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todo_api::api::{self, Config, ServerError};
use todo_api::db::{Backend, DbConfig, DbError, MemoryDatabase, MongoConnection, MongoDatabase};
use tracing::{info, warn};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(todo_api::binary::database))]
    Database(#[from] DbError),

    #[error("API server error: {0}")]
    #[diagnostic(code(todo_api::binary::api))]
    Api(#[from] ServerError),
}

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(author, version, about = "Todo API server", long_about = None)]
struct Cli {
    /// Host address to bind to (default: HOST env or 0.0.0.0)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (default: PORT env or 3000)
    #[arg(short, long)]
    port: Option<u16>,

    /// MongoDB connection string, or memory:// for a non-persistent store
    /// (default: MONGODB_URI env or mongodb://localhost:27017)
    #[arg(long)]
    database_url: Option<String>,

    /// Database name (default: MONGODB_DATABASE env or todolist)
    #[arg(long)]
    database_name: Option<String>,

    /// Allow browser access from this origin only (default: CORS_ORIGIN env, unset)
    #[arg(long)]
    cors_origin: Option<String>,
}

impl Cli {
    fn configs(self) -> (Config, DbConfig) {
        let mut config = Config::new();
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(origin) = self.cors_origin {
            config = config.with_cors_origin(origin);
        }

        let mut db_config = DbConfig::new();
        if let Some(url) = self.database_url {
            db_config = db_config.with_url(url);
        }
        if let Some(name) = self.database_name {
            db_config = db_config.with_name(name);
        }

        (config, db_config)
    }
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    api::init_tracing();
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let (config, db_config) = Cli::parse().configs();

    match db_config.backend() {
        Backend::Memory => {
            warn!("Using in-memory storage; todos are lost on exit");
            api::run(config, MemoryDatabase::new()).await?;
        }
        Backend::Mongo => {
            // Connection failure is fatal to startup
            let conn = MongoConnection::from_config(&db_config);
            conn.connect().await?;
            api::run(config, MongoDatabase::new(conn)).await?;
        }
    }

    Ok(())
}
