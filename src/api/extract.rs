//! Custom Axum extractors.
//!
//! Path ids and JSON bodies are validated here, before any handler logic,
//! so handlers only ever see typed, checked input.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::db::utils::parse_entity_id;

/// Conversion of a raw request DTO into a validated model.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, String>;
}

/// Extract and validate a todo id from the path.
///
/// Holds the canonical (lowercase hex) form of the id.
#[derive(Debug, Clone)]
pub struct ValidTodoId(pub String);

impl<S> FromRequestParts<S> for ValidTodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation("Missing todo id".to_string()))?;

        let oid = parse_entity_id(&id)
            .map_err(|_| ApiError::Validation(format!("Invalid todo id: {}", id)))?;

        Ok(Self(oid.to_hex()))
    }
}

/// Extract a JSON body of type `T` and validate it into `T::Output`.
pub struct ValidJson<T: Validate>(pub T::Output);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: Validate + DeserializeOwned + Send,
    T::Output: Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        raw.validate().map(Self).map_err(ApiError::Validation)
    }
}
