//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for todo storage,
//! allowing the document database and the in-memory store to be swapped
//! without changing handler logic.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Todo, TodoFields, Priority)
//! - `repository`: Trait definitions for data access
//! - `mongo`: MongoDB backend and connection manager
//! - `memory`: Process-local backend

mod config;
mod error;
mod models;
mod repository;
pub mod utils;

pub mod memory;
pub mod mongo;

#[cfg(test)]
mod models_test;

pub use config::{Backend, DbConfig};
pub use error::{DbError, DbResult};
pub use memory::MemoryDatabase;
pub use models::*;
pub use mongo::{MongoConnection, MongoDatabase};
pub use repository::*;
