//! API route configuration.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{delete, get, post, put};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateTodoFailureResponse, CreateTodoResponse, DeleteTodoResponse, EnvelopeStatus,
    ErrorResponse, HealthResponse, TodoRequest, TodoResponse,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "CRUD service for todo records",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_todos,
        handlers::get_todo,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(
        schemas(
            HealthResponse,
            TodoResponse,
            TodoRequest,
            EnvelopeStatus,
            CreateTodoResponse,
            CreateTodoFailureResponse,
            DeleteTodoResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "todos", description = "Todo management endpoints")
    )
)]
pub struct ApiDoc;

/// CORS policy restricting browser access to a single origin.
///
/// Requests from any other origin get no `Access-Control-Allow-Origin` header.
pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the API router with OpenAPI documentation.
///
/// Without a `cors_origin` no CORS headers are emitted.
pub fn create_router<D: Database>(state: AppState<D>, cors_origin: Option<HeaderValue>) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = routes!(D => {
        get "/health" => handlers::health,
    })
    .route("/", get(handlers::root));

    let todo_routes = routes!(D => {
        get "/todos" => handlers::list_todos,
        get "/todos/{id}" => handlers::get_todo,
        post "/todos" => handlers::create_todo,
        put "/todos/{id}" => handlers::update_todo,
        delete "/todos/{id}" => handlers::delete_todo,
    });

    let router = system_routes
        .merge(todo_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state);

    match cors_origin {
        Some(origin) => router.layer(cors_layer(origin)),
        None => router,
    }
}
