use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use cantoria_core::constants::SEARCH_ROUTE_COMPONENT;
use cantoria_service::auth::{Action, Resource, authorize_from_depot};
use cantoria_service::search::depot::get_youtube_client_from_depot;
use cantoria_service::search::{ConvertInput, ConvertedLinks, SearchHit, convert, search_music};

use super::json_body;
use crate::config::get_config_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /search/music?q=&secao= - YouTube passthrough with watch and MP3 links.
///
/// ## Errors
/// 400 for an empty query or unknown section, 502 when YouTube is unreachable
/// or no API key is configured.
#[handler]
async fn music(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<SearchHit>>> {
    authorize_from_depot(depot, Resource::Search, Action::Read)?;
    let q = req.query::<String>("q");
    let section = req.query::<String>("secao");
    let config = get_config_from_depot(depot)?;
    let client = get_youtube_client_from_depot(depot)?;

    Ok(Json(
        search_music(&client, &config.search, q.as_deref(), section.as_deref()).await?,
    ))
}

/// POST /search/youtube-to-mp3 - Builds converter links; nothing is downloaded.
#[handler]
async fn youtube_to_mp3(req: &mut Request, depot: &mut Depot) -> AppResult<Json<ConvertedLinks>> {
    authorize_from_depot(depot, Resource::Search, Action::Read)?;
    let input: ConvertInput = json_body(req).await?;
    let config = get_config_from_depot(depot)?;

    Ok(Json(convert(&config.search, input)?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SEARCH_ROUTE_COMPONENT)
        .push(Router::with_path("music").get(music))
        .push(Router::with_path("youtube-to-mp3").post(youtube_to_mp3))
}
