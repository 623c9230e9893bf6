use std::sync::Arc;

use salvo::Router;

use cantoria_core::config::{
    AuthConfig, DatabaseConfig, LoggingConfig, SearchConfig, ServerConfig, Settings,
};
use cantoria_service::auth::casbin::{CasbinEnforcerHandler, init_casbin};
use cantoria_service::search::YoutubeClient;
use cantoria_service::search::depot::YoutubeClientHandler;

use crate::config::ConfigHandler;

pub fn settings() -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "postgres://localhost/cantoria_unused".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            token_ttl_hours: 1,
            bootstrap_admin: None,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8698,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        search: SearchConfig {
            youtube_api_key: None,
            api_base_url: "http://127.0.0.1:9".to_string(),
            converter_base_url: "https://www.y2mate.com/youtube/".to_string(),
            max_results: 5,
        },
    }
}

/// Wraps `routes` with configuration and authorization but no database.
pub async fn service_without_db(routes: Router) -> Router {
    let enforcer = init_casbin().await.expect("enforcer");
    let settings = settings();
    let youtube = YoutubeClient::from_config(&settings.search).expect("http client");
    Router::new()
        .hoop(ConfigHandler {
            settings: Arc::new(settings),
        })
        .hoop(CasbinEnforcerHandler {
            enforcer: Arc::new(enforcer),
        })
        .hoop(YoutubeClientHandler {
            client: Arc::new(youtube),
        })
        .push(routes)
}
