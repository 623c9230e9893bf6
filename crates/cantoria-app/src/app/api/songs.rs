use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use cantoria_core::constants::SONGS_ROUTE_COMPONENT;
use cantoria_db::model::song::MassSong;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::error::ServiceError;
use cantoria_service::program::{
    SongInput, SongPatch, add_song, list_songs, remove_song, remove_song_by_id, songs_by_section,
    update_song,
};

use super::{SuccessBody, json_body, path_id, success};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /missas/:id/musicas?secao= - Songs of a mass in insertion order,
/// narrowed to one section when `secao` is given.
///
/// ## Errors
/// 400 for an unknown section, 404 for an unknown mass.
#[handler]
async fn list_for_mass(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<MassSong>>> {
    authorize_from_depot(depot, Resource::Song, Action::Read)?;
    let mass_id = path_id(req, "id")?;
    let section = req.query::<String>("secao");
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let songs = match section.as_deref().map(str::trim) {
        Some(section) if !section.is_empty() => songs_by_section(&mut conn, mass_id, section).await?,
        _ => list_songs(&mut conn, mass_id).await?,
    };
    Ok(Json(songs))
}

async fn insert(
    depot: &Depot,
    res: &mut Response,
    mass_id: uuid::Uuid,
    input: SongInput,
) -> AppResult<Json<MassSong>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let song = add_song(&mut conn, mass_id, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(song))
}

/// POST /missas/:id/musicas - Adds a song to the mass in the path.
#[handler]
async fn create_for_mass(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<MassSong>> {
    authorize_from_depot(depot, Resource::Song, Action::Write)?;
    let mass_id = path_id(req, "id")?;
    let input: SongInput = json_body(req).await?;
    insert(depot, res, mass_id, input).await
}

/// ## Summary
/// POST /musicas - Adds a song to the mass named by `missa_id` in the body.
///
/// ## Errors
/// 400 without `missa_id`, an unknown section or a blank name.
#[handler]
async fn create(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<MassSong>> {
    authorize_from_depot(depot, Resource::Song, Action::Write)?;
    let input: SongInput = json_body(req).await?;
    let mass_id = input
        .mass_id
        .ok_or_else(|| ServiceError::ValidationError("missa_id is required".to_string()))?;
    insert(depot, res, mass_id, input).await
}

/// PUT /musicas/:id - Descriptive fields only. Sections never change in place.
#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MassSong>> {
    authorize_from_depot(depot, Resource::Song, Action::Write)?;
    let id = path_id(req, "id")?;
    let patch: SongPatch = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(update_song(&mut conn, id, patch).await?))
}

#[handler]
async fn remove(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Song, Action::Write)?;
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    remove_song_by_id(&mut conn, id).await?;
    Ok(success())
}

/// DELETE /missas/:id/musicas/:song_id - Fails 404 when the song sits in another mass.
#[handler]
async fn remove_from_mass(req: &mut Request, depot: &mut Depot) -> AppResult<Json<SuccessBody>> {
    authorize_from_depot(depot, Resource::Song, Action::Write)?;
    let mass_id = path_id(req, "id")?;
    let song_id = path_id(req, "song_id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    remove_song(&mut conn, mass_id, song_id).await?;
    Ok(success())
}

/// Routes mounted below `/missas/{id}`.
#[must_use]
pub fn mass_routes() -> Router {
    Router::with_path(SONGS_ROUTE_COMPONENT)
        .get(list_for_mass)
        .post(create_for_mass)
        .push(Router::with_path("{song_id}").delete(remove_from_mass))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SONGS_ROUTE_COMPONENT)
        .post(create)
        .push(Router::with_path("{id}").put(update).delete(remove))
}
