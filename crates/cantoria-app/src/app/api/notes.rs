use std::collections::BTreeMap;

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use cantoria_core::constants::NOTES_ROUTE_COMPONENT;
use cantoria_db::model::note::MusicianNote;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::roster::note::{
    NoteInput, add_note, delete_note, list_notes, notes_by_musician,
};

use super::{SuccessBody, json_body, path_id, success};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// GET /anotacoes - Every note, grouped by musician id.
#[handler]
async fn list_grouped(depot: &mut Depot) -> AppResult<Json<BTreeMap<uuid::Uuid, Vec<MusicianNote>>>> {
    authorize_from_depot(depot, Resource::Note, Action::Read)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(notes_by_musician(&mut conn).await?))
}

/// GET /musicos/:id/anotacoes
#[handler]
async fn list_for_musician(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<MusicianNote>>> {
    authorize_from_depot(depot, Resource::Note, Action::Read)?;
    let musician_id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_notes(&mut conn, musician_id).await?))
}

/// POST /musicos/:id/anotacoes
#[handler]
async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<MusicianNote>> {
    authorize_from_depot(depot, Resource::Note, Action::Write)?;
    let musician_id = path_id(req, "id")?;
    let input: NoteInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let note = add_note(&mut conn, musician_id, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(note))
}

#[handler]
async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Note, Action::Write)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    delete_note(&mut conn, id).await?;
    Ok(success())
}

/// Routes mounted below `/musicos/{id}`.
#[must_use]
pub fn musician_routes() -> Router {
    Router::with_path(NOTES_ROUTE_COMPONENT)
        .get(list_for_musician)
        .post(create)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(NOTES_ROUTE_COMPONENT)
        .get(list_grouped)
        .push(Router::with_path("{id}").delete(remove))
}
