use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use cantoria_core::constants::AVAILABILITY_ROUTE_COMPONENT;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::availability::{
    BlockInput, BlockPatch, BlockView, create_block, delete_block, list_all_blocks, list_blocks,
    update_block,
};

use super::{SuccessBody, json_body, path_id, query_id, success};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// GET /indisponibilidades?musico_id= - All blocks, or one musician's.
#[handler]
async fn list(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<BlockView>>> {
    authorize_from_depot(depot, Resource::Availability, Action::Read)?;
    let musician_id = query_id(req, "musico_id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_all_blocks(&mut conn, musician_id).await?))
}

/// GET /musicos/:id/indisponibilidades - Sorted by start date.
#[handler]
async fn list_for_musician(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<BlockView>>> {
    authorize_from_depot(depot, Resource::Availability, Action::Read)?;
    let musician_id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_blocks(&mut conn, musician_id).await?))
}

/// ## Summary
/// POST /indisponibilidades - Records a block for the musician in `musico_id`.
///
/// ## Errors
/// 400 for missing dates, an unknown reason, `outro` without custom text or
/// an inverted range. 404 when the musician does not exist.
#[handler]
async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<BlockView>> {
    authorize_from_depot(depot, Resource::Availability, Action::Write)?;
    let input: BlockInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let block = create_block(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(block))
}

#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<BlockView>> {
    authorize_from_depot(depot, Resource::Availability, Action::Write)?;
    let id = path_id(req, "id")?;
    let patch: BlockPatch = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(update_block(&mut conn, id, patch).await?))
}

#[handler]
async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Availability, Action::Write)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    delete_block(&mut conn, id).await?;
    Ok(success())
}

#[must_use]
pub fn musician_routes() -> Router {
    Router::with_path(AVAILABILITY_ROUTE_COMPONENT).get(list_for_musician)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(AVAILABILITY_ROUTE_COMPONENT)
        .get(list)
        .post(create)
        .push(Router::with_path("{id}").put(update).delete(remove))
}
