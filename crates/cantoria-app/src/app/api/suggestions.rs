use std::collections::BTreeMap;

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use cantoria_core::constants::SUGGESTIONS_ROUTE_COMPONENT;
use cantoria_db::model::suggestion::MusicianSuggestion;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::roster::suggestion::{
    SuggestionInput, SuggestionPatch, add_suggestion, delete_suggestion, list_suggestions,
    suggestions_by_musician, update_suggestion,
};

use super::{SuccessBody, json_body, path_id, success};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

type Grouped = BTreeMap<uuid::Uuid, Vec<MusicianSuggestion>>;

/// GET /sugestoes - Every suggestion, grouped by musician id.
#[handler]
async fn list_grouped(depot: &mut Depot) -> AppResult<Json<Grouped>> {
    authorize_from_depot(depot, Resource::Suggestion, Action::Read)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(suggestions_by_musician(&mut conn).await?))
}

#[handler]
async fn list_for_musician(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Vec<MusicianSuggestion>>> {
    authorize_from_depot(depot, Resource::Suggestion, Action::Read)?;
    let musician_id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_suggestions(&mut conn, musician_id).await?))
}

/// ## Summary
/// POST /musicos/:id/sugestoes - New suggestions start as `pendente`
/// unless the body names a status.
#[handler]
async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<MusicianSuggestion>> {
    authorize_from_depot(depot, Resource::Suggestion, Action::Write)?;
    let musician_id = path_id(req, "id")?;
    let input: SuggestionInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let suggestion = add_suggestion(&mut conn, musician_id, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(suggestion))
}

/// PUT /sugestoes/:id - Text and status updates.
#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MusicianSuggestion>> {
    authorize_from_depot(depot, Resource::Suggestion, Action::Write)?;
    let id = path_id(req, "id")?;
    let patch: SuggestionPatch = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(update_suggestion(&mut conn, id, patch).await?))
}

#[handler]
async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Suggestion, Action::Write)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    delete_suggestion(&mut conn, id).await?;
    Ok(success())
}

#[must_use]
pub fn musician_routes() -> Router {
    Router::with_path(SUGGESTIONS_ROUTE_COMPONENT)
        .get(list_for_musician)
        .post(create)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SUGGESTIONS_ROUTE_COMPONENT)
        .get(list_grouped)
        .push(Router::with_path("{id}").put(update).delete(remove))
}
