pub mod api;

use std::sync::Arc;

use salvo::Router;

use cantoria_core::config::Settings;
use cantoria_db::db::DbProvider;
use cantoria_service::auth::casbin::{CasbinEnforcerHandler, init_casbin};
use cantoria_service::search::YoutubeClient;
use cantoria_service::search::depot::YoutubeClientHandler;

use crate::config::ConfigHandler;
use crate::db_handler::DbProviderHandler;

/// ## Summary
/// Assembles the complete service: database, configuration, authorizer and
/// YouTube client injected ahead of the API routes.
///
/// ## Errors
/// Returns an error if the authorization model fails to load or the HTTP
/// client cannot be built.
pub async fn build_router<P: DbProvider + 'static>(
    settings: Settings,
    provider: P,
) -> anyhow::Result<Router> {
    let enforcer = init_casbin().await?;
    let youtube = YoutubeClient::from_config(&settings.search)?;

    Ok(Router::new()
        .hoop(DbProviderHandler::new(provider))
        .hoop(ConfigHandler {
            settings: Arc::new(settings),
        })
        .hoop(CasbinEnforcerHandler {
            enforcer: Arc::new(enforcer),
        })
        .hoop(YoutubeClientHandler {
            client: Arc::new(youtube),
        })
        .push(api::routes()))
}
