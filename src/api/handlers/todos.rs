//! Todo management handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use super::ErrorResponse;
use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::extract::{Validate, ValidJson, ValidTodoId};
use crate::db::{Database, Priority, Todo, TodoFields, TodoRepository};

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_STATUS_LEN: usize = 50;

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Todo response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    /// Opaque identifier (24-character hex)
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[schema(example = "Milk")]
    pub name: String,
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: Option<String>,
    /// One of low, medium, high
    #[schema(example = "high")]
    pub priority: Option<String>,
    #[schema(example = "open")]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Null until the first update
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            priority: t.priority.map(|p| p.as_str().to_string()),
            status: t.status,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Create/update request DTO.
///
/// Update is a full replacement: fields left out are cleared.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TodoRequest {
    /// Required, non-blank
    #[schema(example = "Milk")]
    pub name: Option<String>,
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: Option<String>,
    /// One of low, medium, high
    #[schema(example = "high")]
    pub priority: Option<String>,
    /// Free-form status
    #[schema(example = "open")]
    pub status: Option<String>,
}

impl Validate for TodoRequest {
    type Output = TodoFields;

    fn validate(self) -> Result<TodoFields, String> {
        let name = optional_text(self.name, "name", MAX_NAME_LEN)?
            .ok_or_else(|| "name is required".to_string())?;
        let description = optional_text(self.description, "description", MAX_DESCRIPTION_LEN)?;
        let status = optional_text(self.status, "status", MAX_STATUS_LEN)?;
        let priority = self
            .priority
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.parse::<Priority>())
            .transpose()?;

        Ok(TodoFields {
            name,
            description,
            priority,
            status,
        })
    }
}

/// Trim, treat blank as absent, enforce a character limit.
fn optional_text(
    value: Option<String>,
    field: &str,
    max: usize,
) -> Result<Option<String>, String> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(format!("{} must be at most {} characters", field, max));
    }
    Ok(Some(trimmed.to_string()))
}

/// Envelope status for create responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Failure,
}

/// Create success envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTodoResponse {
    #[schema(example = "success")]
    pub status: EnvelopeStatus,
    pub todo: TodoResponse,
}

/// Create failure envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTodoFailureResponse {
    #[schema(example = "failure")]
    pub status: EnvelopeStatus,
    #[schema(example = "name is required")]
    pub error: String,
}

/// Create failure: same status codes as [`ApiError`], envelope body.
#[derive(Debug)]
pub struct CreateTodoFailure(pub ApiError);

impl From<ApiError> for CreateTodoFailure {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl IntoResponse for CreateTodoFailure {
    fn into_response(self) -> Response {
        let body = CreateTodoFailureResponse {
            status: EnvelopeStatus::Failure,
            error: self.0.client_message(),
        };
        (self.0.status(), Json(body)).into_response()
    }
}

/// Delete confirmation DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteTodoResponse {
    #[schema(example = "Todo deleted")]
    pub message: String,
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all todos
///
/// Returns every stored todo
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "All todos", body = Vec<TodoResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.db().todos().list().await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(
        ("id" = String, Path, description = "Todo ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Todo found", body = TodoResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo<D: Database>(
    State(state): State<AppState<D>>,
    ValidTodoId(id): ValidTodoId,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.db().todos().get(&id).await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// Create a new todo
///
/// Inserts the todo and returns the stored record in a status envelope
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo created", body = CreateTodoResponse),
        (status = 400, description = "Invalid request body", body = CreateTodoFailureResponse),
        (status = 500, description = "Internal server error", body = CreateTodoFailureResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    body: Result<ValidJson<TodoRequest>, ApiError>,
) -> Result<Json<CreateTodoResponse>, CreateTodoFailure> {
    let ValidJson(fields) = body?;

    let todo = state
        .db()
        .todos()
        .create(&fields)
        .await
        .map_err(ApiError::from)?;

    info!(id = %todo.id, "Todo created");

    Ok(Json(CreateTodoResponse {
        status: EnvelopeStatus::Success,
        todo: TodoResponse::from(todo),
    }))
}

/// Update a todo
///
/// Replaces name, description, priority and status; omitted fields are cleared
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(
        ("id" = String, Path, description = "Todo ID (24-character hex)")
    ),
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Todo updated", body = TodoResponse),
        (status = 400, description = "Malformed id or invalid body", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    ValidTodoId(id): ValidTodoId,
    ValidJson(fields): ValidJson<TodoRequest>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.db().todos().update(&id, &fields).await?;

    info!(id = %todo.id, "Todo updated");

    Ok(Json(TodoResponse::from(todo)))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(
        ("id" = String, Path, description = "Todo ID (24-character hex)")
    ),
    responses(
        (status = 200, description = "Todo deleted", body = DeleteTodoResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    ValidTodoId(id): ValidTodoId,
) -> Result<(StatusCode, Json<DeleteTodoResponse>), ApiError> {
    state.db().todos().delete(&id).await?;

    info!(id = %id, "Todo deleted");

    Ok((
        StatusCode::OK,
        Json(DeleteTodoResponse {
            message: "Todo deleted".to_string(),
            id,
        }),
    ))
}
