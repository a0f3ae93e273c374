//! Application configuration
//!
//! Loaded from environment variables with the `PATRON_SYNC` prefix; nested
//! values use `__` as the separator. A `.env` file is read first when present.
//!
//! ```no_run
//! use patron_sync::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod feed;
mod oauth;
mod server;
mod session;
mod tiers;
mod webhook;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use feed::FeedConfig;
pub use oauth::OAuthConfig;
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;
pub use tiers::TiersConfig;
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Patreon OAuth client
    pub oauth: OAuthConfig,

    /// Patreon webhook secret
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub tiers: TiersConfig,

    #[serde(default)]
    pub session: SessionConfig,

    /// PostgreSQL; absent means in-memory storage
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub feed: FeedConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `PATRON_SYNC__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PATRON_SYNC__OAUTH__CLIENT_ID=...` -> `oauth.client_id = ...`
    /// - `PATRON_SYNC__TIERS__THRESHOLDS=100:1,300:2` -> `tiers.thresholds`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PATRON_SYNC")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;

        self.server.validate()?;
        self.oauth.validate(environment)?;
        self.session.validate()?;
        self.webhook.validate()?;
        self.tiers.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.feed.validate(environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
