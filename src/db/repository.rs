//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//!
//! Methods return `impl Future + Send` so that axum handlers generic over
//! [`Database`] stay `Send`. Implementations may still use `async fn`.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Todo, TodoFields},
};

/// Repository for Todo operations.
pub trait TodoRepository {
    /// Get all todos, in backend-defined order.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Todo>>> + Send;

    /// Get a todo by ID.
    ///
    /// Returns `DbError::NotFound` when no record has this id.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Insert a new todo with a storage-assigned id and creation timestamp.
    ///
    /// Returns the record as read back from storage.
    fn create(&self, fields: &TodoFields) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Replace the writable fields of an existing todo and refresh `updated_at`.
    ///
    /// Never inserts. Returns the record as it is after the update.
    fn update(&self, id: &str, fields: &TodoFields)
    -> impl Future<Output = DbResult<Todo>> + Send;

    /// Delete a todo by ID.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync + 'static {
    type Todos<'a>: TodoRepository + Send + Sync
    where
        Self: 'a;

    /// Get the todo repository.
    fn todos(&self) -> Self::Todos<'_>;

    /// Check that the backend is reachable.
    fn ping(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Release backend resources. Called once after the server stops.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
