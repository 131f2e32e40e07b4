//! In-memory implementation of the database traits.
//!
//! Selected with the `memory://` database URL and used by the router tests.
//! Semantics match the MongoDB backend: object-id identifiers, insertion
//! order for listing, full-replace updates.

mod todo;


use tokio::sync::RwLock;

pub use todo::MemoryTodoRepository;

use crate::db::{Database, DbResult, Todo};

/// Process-local todo store.
#[derive(Default)]
pub struct MemoryDatabase {
    // Kept in insertion order
    todos: RwLock<Vec<Todo>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database for MemoryDatabase {
    type Todos<'a> = MemoryTodoRepository<'a>;

    fn todos(&self) -> Self::Todos<'_> {
        MemoryTodoRepository { todos: &self.todos }
    }

    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}
