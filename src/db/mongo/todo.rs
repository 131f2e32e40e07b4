//! MongoDB TodoRepository implementation.

use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;

use super::connection::MongoConnection;
use super::document::{COLLECTION, TodoDocument};
use super::map_mongo_error;
use crate::db::utils::{current_timestamp, parse_entity_id};
use crate::db::{DbError, DbResult, Todo, TodoFields, TodoRepository};

/// Collection-backed todo repository.
pub struct MongoTodoRepository<'a> {
    pub(crate) conn: &'a MongoConnection,
}

impl MongoTodoRepository<'_> {
    fn collection(&self) -> DbResult<Collection<TodoDocument>> {
        Ok(self.conn.database()?.collection(COLLECTION))
    }
}

impl TodoRepository for MongoTodoRepository<'_> {
    async fn list(&self) -> DbResult<Vec<Todo>> {
        let cursor = self
            .collection()?
            .find(doc! {})
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<TodoDocument> = cursor.try_collect().await.map_err(map_mongo_error)?;

        documents.into_iter().map(TodoDocument::into_todo).collect()
    }

    async fn get(&self, id: &str) -> DbResult<Todo> {
        let oid = parse_entity_id(id)?;

        self.collection()?
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(|| DbError::todo_not_found(id))?
            .into_todo()
    }

    async fn create(&self, fields: &TodoFields) -> DbResult<Todo> {
        let collection = self.collection()?;
        let document = TodoDocument::new(fields, current_timestamp());

        let result = collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;
        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DbError::Database {
                message: format!("unexpected inserted id: {}", result.inserted_id),
            })?;

        // Read back so the response reflects what was stored
        collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(|| DbError::Database {
                message: format!("inserted todo '{}' could not be read back", oid),
            })?
            .into_todo()
    }

    async fn update(&self, id: &str, fields: &TodoFields) -> DbResult<Todo> {
        let oid = parse_entity_id(id)?;

        self.collection()?
            .find_one_and_update(
                doc! { "_id": oid },
                TodoDocument::replace_update(fields, current_timestamp()),
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(|| DbError::todo_not_found(id))?
            .into_todo()
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let oid = parse_entity_id(id)?;

        let result = self
            .collection()?
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(map_mongo_error)?;

        if result.deleted_count == 0 {
            return Err(DbError::todo_not_found(id));
        }
        Ok(())
    }
}
