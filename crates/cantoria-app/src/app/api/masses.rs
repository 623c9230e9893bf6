use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use cantoria_core::constants::{MASSES_ROUTE_COMPONENT, MUSICIANS_ROUTE_COMPONENT};
use cantoria_db::model::assignment::MassAssignment;
use cantoria_db::model::mass::Mass;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::program::{FillRate, MassProgram, mass_fill_rate, program};
use cantoria_service::schedule::assignment::{
    AssignedMusician, AssignmentInput, assign_musician, list_assigned, unassign_musician,
};
use cantoria_service::schedule::mass::{
    MassDetail, MassInput, MassPatch, create_mass, delete_mass, get_mass, list_masses, update_mass,
};

use super::{SuccessBody, json_body, path_id, songs, success};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// GET /missas?q= - Masses by date then time, optionally filtered.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<Mass>>> {
    authorize_from_depot(depot, Resource::Mass, Action::Read)?;
    let q = req.query::<String>("q");
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_masses(&mut conn, q.as_deref()).await?))
}

/// GET /missas/:id - The mass with its songs.
#[handler]
async fn show(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MassDetail>> {
    authorize_from_depot(depot, Resource::Mass, Action::Read)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(get_mass(&mut conn, id).await?))
}

#[handler]
async fn create(req: &mut Request, depot: &mut Depot, res: &mut Response) -> AppResult<Json<Mass>> {
    authorize_from_depot(depot, Resource::Mass, Action::Write)?;
    let input: MassInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let mass = create_mass(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(mass))
}

#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Mass>> {
    authorize_from_depot(depot, Resource::Mass, Action::Write)?;
    let id = path_id(req, "id")?;
    let patch: MassPatch = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(update_mass(&mut conn, id, patch).await?))
}

/// ## Summary
/// DELETE /missas/:id
///
/// ## Side Effects
/// Cascades to the mass songs and musician assignments.
#[handler]
async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Mass, Action::Write)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    delete_mass(&mut conn, id).await?;
    Ok(success())
}

/// GET /missas/:id/programa - Every section in display order plus the fill rate.
#[handler]
async fn show_program(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MassProgram>> {
    authorize_from_depot(depot, Resource::Song, Action::Read)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(program(&mut conn, id).await?))
}

#[handler]
async fn show_fill_rate(req: &mut Request, depot: &mut Depot) -> AppResult<Json<FillRate>> {
    authorize_from_depot(depot, Resource::Song, Action::Read)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(mass_fill_rate(&mut conn, id).await?))
}

/// ## Summary
/// GET /missas/:id/musicos - Assigned musicians, each flagged `indisponivel`
/// when one of their blocks covers the mass date.
#[handler]
async fn list_musicians(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Vec<AssignedMusician>>> {
    authorize_from_depot(depot, Resource::Musician, Action::Read)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_assigned(&mut conn, id).await?))
}

/// ## Summary
/// POST /missas/:id/musicos - Assigns the musician in `musico_id`.
///
/// ## Errors
/// 400 when the musician is already assigned, 404 for an unknown mass or musician.
#[handler]
async fn assign(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<MassAssignment>> {
    authorize_from_depot(depot, Resource::Mass, Action::Write)?;
    let id = path_id(req, "id")?;
    let input: AssignmentInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let assignment = assign_musician(&mut conn, id, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(assignment))
}

#[handler]
async fn unassign(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Mass, Action::Write)?;
    let id = path_id(req, "id")?;
    let musician_id = path_id(req, "musician_id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    unassign_musician(&mut conn, id, musician_id).await?;
    Ok(success())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(MASSES_ROUTE_COMPONENT)
        .get(list)
        .post(create)
        .push(
            Router::with_path("{id}")
                .get(show)
                .put(update)
                .delete(remove)
                .push(songs::mass_routes())
                .push(Router::with_path("programa").get(show_program))
                .push(Router::with_path("preenchimento").get(show_fill_rate))
                .push(
                    Router::with_path(MUSICIANS_ROUTE_COMPONENT)
                        .get(list_musicians)
                        .post(assign)
                        .push(Router::with_path("{musician_id}").delete(unassign)),
                ),
        )
}
