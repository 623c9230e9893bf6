mod analytics;
mod app_specific;
mod auth;
mod availability;
mod library;
mod masses;
mod musicians;
mod notes;
mod search;
mod songs;
mod suggestions;

use salvo::writing::Json;
use salvo::{Request, Router};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionMiddleware;

pub use cantoria_core::constants::{API_ROUTE_COMPONENT, API_ROUTE_PREFIX};

/// ## Summary
/// Constructs the API router with every resource mounted under `/api`.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(SessionMiddleware)
        .push(app_specific::routes())
        .push(auth::routes())
        .push(musicians::routes())
        .push(masses::routes())
        .push(songs::routes())
        .push(library::routes())
        .push(notes::routes())
        .push(suggestions::routes())
        .push(availability::routes())
        .push(analytics::routes())
        .push(search::routes())
}

/// Body returned by deletions and logout.
#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
}

pub(crate) fn success() -> Json<SuccessBody> {
    Json(SuccessBody { success: true })
}

/// ## Summary
/// Reads a UUID path parameter.
///
/// ## Errors
/// Returns `BadRequest` if the parameter is absent or not a UUID.
pub(crate) fn path_id(req: &Request, name: &str) -> AppResult<uuid::Uuid> {
    let raw = req
        .param::<String>(name)
        .ok_or_else(|| AppError::BadRequest(format!("missing path parameter {name}")))?;
    uuid::Uuid::parse_str(&raw)
        .map_err(|err| AppError::BadRequest(format!("invalid {name} '{raw}': {err}")))
}

/// ## Summary
/// Reads an optional UUID query parameter. A blank value counts as absent.
///
/// ## Errors
/// Returns `BadRequest` if the value is present but not a UUID.
pub(crate) fn query_id(req: &Request, name: &str) -> AppResult<Option<uuid::Uuid>> {
    match req.query::<String>(name) {
        Some(raw) if !raw.trim().is_empty() => uuid::Uuid::parse_str(raw.trim())
            .map(Some)
            .map_err(|err| AppError::BadRequest(format!("invalid {name} '{raw}': {err}"))),
        _ => Ok(None),
    }
}

/// ## Errors
/// Returns `BadRequest` if the body is not valid JSON for `T`.
pub(crate) async fn json_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>()
        .await
        .map_err(|err| AppError::BadRequest(format!("Invalid request body: {err}")))
}
