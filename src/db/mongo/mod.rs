//! MongoDB implementation of the database traits.
//!
//! This module provides a MongoDB-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod document;
mod todo;

#[cfg(test)]
mod document_test;

use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind};

pub use connection::MongoConnection;
pub use todo::MongoTodoRepository;

use crate::db::{Database, DbError, DbResult};

/// MongoDB database implementation.
///
/// Owns the connection manager; repositories borrow it per request and
/// resolve the collection handle from the established connection.
pub struct MongoDatabase {
    conn: MongoConnection,
}

impl MongoDatabase {
    /// Wrap a connection manager. The connection may or may not be
    /// established yet; operations fail with `DbError::NotInitialized` until it is.
    pub fn new(conn: MongoConnection) -> Self {
        Self { conn }
    }
}

impl Database for MongoDatabase {
    type Todos<'a> = MongoTodoRepository<'a>;

    fn todos(&self) -> Self::Todos<'_> {
        MongoTodoRepository { conn: &self.conn }
    }

    async fn ping(&self) -> DbResult<()> {
        self.conn
            .database()?
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }

    async fn close(&self) {
        self.conn.close().await;
    }
}

/// Translate a driver error into a storage-agnostic one.
pub(crate) fn map_mongo_error(err: MongoError) -> DbError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Io(_) => DbError::Connection {
            message: err.to_string(),
        },
        _ => DbError::Database {
            message: err.to_string(),
        },
    }
}
