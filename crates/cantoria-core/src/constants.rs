/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const AUTH_ROUTE_COMPONENT: &str = "auth";
pub const MUSICIANS_ROUTE_COMPONENT: &str = "musicos";
pub const MASSES_ROUTE_COMPONENT: &str = "missas";
pub const SONGS_ROUTE_COMPONENT: &str = "musicas";
pub const LIBRARY_ROUTE_COMPONENT: &str = "biblioteca-musicas";
pub const NOTES_ROUTE_COMPONENT: &str = "anotacoes";
pub const SUGGESTIONS_ROUTE_COMPONENT: &str = "sugestoes";
pub const AVAILABILITY_ROUTE_COMPONENT: &str = "indisponibilidades";
pub const ANALYTICS_ROUTE_COMPONENT: &str = "analytics";
pub const SEARCH_ROUTE_COMPONENT: &str = "search";

/// Prefix of the `Authorization` header value carrying a session token
pub const BEARER_PREFIX: &str = "Bearer ";

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
pub const MP3_CONVERTER_BASE: &str = "https://www.y2mate.com/youtube/";
