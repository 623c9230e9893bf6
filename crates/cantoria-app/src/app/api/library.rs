use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use cantoria_core::constants::LIBRARY_ROUTE_COMPONENT;
use cantoria_db::model::library::LibrarySong;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::library::{
    LibrarySongInput, LibrarySongPatch, create_library_song, delete_library_song, list_library,
    update_library_song,
};

use super::{SuccessBody, json_body, path_id, success};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn list(depot: &mut Depot) -> AppResult<Json<Vec<LibrarySong>>> {
    authorize_from_depot(depot, Resource::Library, Action::Read)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(list_library(&mut conn).await?))
}

/// POST /biblioteca-musicas - Saves a song, usually with cached video metadata.
#[handler]
async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<LibrarySong>> {
    authorize_from_depot(depot, Resource::Library, Action::Write)?;
    let input: LibrarySongInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let song = create_library_song(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(song))
}

#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<LibrarySong>> {
    authorize_from_depot(depot, Resource::Library, Action::Write)?;
    let id = path_id(req, "id")?;
    let patch: LibrarySongPatch = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(update_library_song(&mut conn, id, patch).await?))
}

#[handler]
async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Library, Action::Write)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    delete_library_song(&mut conn, id).await?;
    Ok(success())
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(LIBRARY_ROUTE_COMPONENT)
        .get(list)
        .post(create)
        .push(Router::with_path("{id}").put(update).delete(remove))
}
