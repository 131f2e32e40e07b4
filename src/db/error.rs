//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(todo_api::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Invalid id: '{id}'")]
    #[diagnostic(
        code(todo_api::db::invalid_id),
        help("Identifiers are 24-character hexadecimal object ids")
    )]
    InvalidId { id: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(todo_api::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(todo_api::db::connection_error),
        help("Is the database reachable? Check MONGODB_URI or --database-url")
    )]
    Connection { message: String },

    #[error("Database connection has not been established")]
    #[diagnostic(code(todo_api::db::not_initialized))]
    NotInitialized,
}

impl DbError {
    pub(crate) fn todo_not_found(id: &str) -> Self {
        DbError::NotFound {
            entity_type: "Todo".to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
