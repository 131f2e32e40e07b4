//! In-memory TodoRepository implementation.

use tokio::sync::RwLock;

use crate::db::utils::{current_timestamp, generate_entity_id, parse_entity_id};
use crate::db::{DbError, DbResult, Todo, TodoFields, TodoRepository};

/// Vec-backed todo repository.
pub struct MemoryTodoRepository<'a> {
    pub(crate) todos: &'a RwLock<Vec<Todo>>,
}

/// Position of the record with the given id.
fn position(todos: &[Todo], id: &str) -> DbResult<usize> {
    let key = parse_entity_id(id)?.to_hex();
    todos
        .iter()
        .position(|todo| todo.id == key)
        .ok_or_else(|| DbError::todo_not_found(id))
}

impl TodoRepository for MemoryTodoRepository<'_> {
    async fn list(&self) -> DbResult<Vec<Todo>> {
        Ok(self.todos.read().await.clone())
    }

    async fn get(&self, id: &str) -> DbResult<Todo> {
        let todos = self.todos.read().await;
        let index = position(&todos, id)?;
        Ok(todos[index].clone())
    }

    async fn create(&self, fields: &TodoFields) -> DbResult<Todo> {
        let todo = Todo::from_fields(generate_entity_id(), fields.clone(), current_timestamp());

        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: &str, fields: &TodoFields) -> DbResult<Todo> {
        let mut todos = self.todos.write().await;
        let index = position(&todos, id)?;

        let todo = &mut todos[index];
        todo.replace_fields(fields.clone(), current_timestamp());
        Ok(todo.clone())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let mut todos = self.todos.write().await;
        let index = position(&todos, id)?;

        todos.remove(index);
        Ok(())
    }
}
