use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{MP3_CONVERTER_BASE, YOUTUBE_API_BASE};
use crate::error::{CoreError, CoreResult};

/// Upper bound accepted by the YouTube search endpoint for `maxResults`.
const MAX_SEARCH_RESULTS: u8 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of an issued bearer token.
    pub token_ttl_hours: u32,
    /// Administrator created at startup when no admin account exists yet.
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

#[derive(Clone, Deserialize)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Clone, Deserialize)]
pub struct SearchConfig {
    pub youtube_api_key: Option<String>,
    pub api_base_url: String,
    pub converter_base_url: String,
    pub max_results: u8,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_key| "<redacted>"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("converter_base_url", &self.converter_base_url)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from compiled defaults, an optional `config.toml`
    /// and `CANTORIA_`-prefixed environment variables, in increasing precedence.
    ///
    /// Nested keys use a double underscore, e.g. `CANTORIA_DATABASE__URL`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("auth.token_ttl_hours", 168)?
            .set_default("search.api_base_url", YOUTUBE_API_BASE)?
            .set_default("search.converter_base_url", MP3_CONVERTER_BASE)?
            .set_default("search.max_results", 12)?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(
                config::Environment::with_prefix("CANTORIA")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks value ranges that deserialization alone cannot express.
    ///
    /// ## Errors
    /// Returns `ConfigError` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.database.max_connections == 0 {
            return Err(CoreError::ConfigError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(CoreError::ConfigError(
                "auth.token_ttl_hours must be at least 1".to_string(),
            ));
        }
        if self.search.max_results == 0 || self.search.max_results > MAX_SEARCH_RESULTS {
            return Err(CoreError::ConfigError(format!(
                "search.max_results must be between 1 and {MAX_SEARCH_RESULTS}"
            )));
        }
        if let Some(admin) = &self.auth.bootstrap_admin
            && (admin.email.trim().is_empty() || admin.password.is_empty())
        {
            return Err(CoreError::ConfigError(
                "auth.bootstrap_admin requires an email and a password".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
