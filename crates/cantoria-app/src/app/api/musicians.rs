use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use cantoria_core::constants::MUSICIANS_ROUTE_COMPONENT;
use cantoria_db::model::musician::Musician;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::roster::musician::{
    MusicianInput, MusicianPatch, create_musician, delete_musician, get_musician, list_musicians,
    update_musician,
};

use super::{SuccessBody, availability, json_body, notes, path_id, success, suggestions};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// GET /musicos?q= - Musicians ordered by name, optionally filtered.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<Musician>>> {
    authorize_from_depot(depot, Resource::Musician, Action::Read)?;
    let q = req.query::<String>("q");
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_musicians(&mut conn, q.as_deref()).await?))
}

#[handler]
async fn show(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Musician>> {
    authorize_from_depot(depot, Resource::Musician, Action::Read)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(get_musician(&mut conn, id).await?))
}

/// ## Summary
/// POST /musicos - Registers a musician. Admin only.
///
/// ## Errors
/// 400 when `nome` or `funcao` is missing.
#[handler]
async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Musician>> {
    authorize_from_depot(depot, Resource::Musician, Action::Write)?;
    let input: MusicianInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let musician = create_musician(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(musician))
}

#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Musician>> {
    authorize_from_depot(depot, Resource::Musician, Action::Write)?;
    let id = path_id(req, "id")?;
    let patch: MusicianPatch = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(update_musician(&mut conn, id, patch).await?))
}

/// ## Summary
/// DELETE /musicos/:id - Removes a musician.
///
/// ## Side Effects
/// Cascades to the musician's notes, suggestions, blocks and assignments.
#[handler]
async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Musician, Action::Write)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    delete_musician(&mut conn, id).await?;
    Ok(success())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(MUSICIANS_ROUTE_COMPONENT)
        .get(list)
        .post(create)
        .push(
            Router::with_path("{id}")
                .get(show)
                .put(update)
                .delete(remove)
                .push(notes::musician_routes())
                .push(suggestions::musician_routes())
                .push(availability::musician_routes()),
        )
}
