mod error;
mod extract;
pub mod handlers;
pub mod routes;
mod state;

#[cfg(test)]
mod error_test;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::ApiError;
pub use extract::{Validate, ValidJson, ValidTodoId};
pub use state::AppState;

use crate::db::Database;

/// Default port to listen on.
pub const DEFAULT_PORT: u16 = 3000;

/// API server configuration.
///
/// Precedence: builder (CLI flag) > environment variable > default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to (`HOST`)
    pub host: IpAddr,
    /// Port to listen on (`PORT`)
    pub port: u16,
    /// Single origin allowed for browser access (`CORS_ORIGIN`)
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_origin: None,
        }
    }
}

impl Config {
    /// Build from environment variables, falling back to defaults.
    ///
    /// Unparseable `HOST`/`PORT` values are ignored.
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|o| !o.is_empty()),
        }
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parsed CORS origin header, if configured.
    pub fn cors_header(&self) -> Result<Option<HeaderValue>, ServerError> {
        self.cors_origin
            .as_deref()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin {
                    origin: origin.to_string(),
                })
            })
            .transpose()
    }
}

/// Server lifecycle errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(todo_api::api::bind),
        help("Is another process already listening on this port? Try --port")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(todo_api::api::serve))]
    Serve(#[source] std::io::Error),

    #[error("Invalid CORS origin: '{origin}'")]
    #[diagnostic(
        code(todo_api::api::invalid_origin),
        help("Use a full origin such as https://app.example.com")
    )]
    InvalidOrigin { origin: String },
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server until ctrl-c/SIGTERM, then close the database.
pub async fn run<D: Database>(config: Config, db: D) -> Result<(), ServerError> {
    let cors_origin = config.cors_header()?;
    if let Some(origin) = &config.cors_origin {
        info!(origin = %origin, "CORS restricted to a single origin");
    }

    let state = AppState::new(db);
    let app = routes::create_router(state.clone(), cors_origin).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("API server stopped, closing database");
    state.db().close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
