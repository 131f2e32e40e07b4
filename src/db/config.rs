//! Storage configuration.

use std::env;

/// Default MongoDB connection string.
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
/// Default database name.
pub const DEFAULT_DATABASE_NAME: &str = "todolist";
/// URL that selects the in-memory backend.
pub const MEMORY_URL: &str = "memory://";

/// Which storage backend a URL selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mongo,
    Memory,
}

/// Storage configuration.
///
/// Precedence: builder (CLI flag) > environment variable > default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Connection string (`MONGODB_URI`)
    pub url: String,
    /// Database name (`MONGODB_DATABASE`)
    pub name: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            name: DEFAULT_DATABASE_NAME.to_string(),
        }
    }
}

impl DbConfig {
    /// Build from environment variables, falling back to defaults.
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("MONGODB_URI")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.url),
            name: env::var("MONGODB_DATABASE")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.name),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Backend selected by the connection string.
    pub fn backend(&self) -> Backend {
        if self.url.starts_with(MEMORY_URL) {
            Backend::Memory
        } else {
            Backend::Mongo
        }
    }
}
