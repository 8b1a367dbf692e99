use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::proxy::DEFAULT_BASE_URL;

/// One year; longer lifetimes are refused at startup.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub username: String,
    pub password: String,
    pub token_ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuditConfig {
    pub actions_path: String,
    pub errors_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allow_any_origin: bool,
    pub max_age: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub upstream: UpstreamConfig,
    pub audit: AuditConfig,
    pub cors: CorsConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let settings: Settings = Self::with_defaults()?
            // Add in settings from the config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))

            // Add in settings from environment variables (with prefix "APP_")
            // E.g., `APP_SERVER__PORT=5001` would set `Settings.server.port`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
            )

            // Plain variables the operator deployment has always used
            .set_override_option("auth.username", env::var("POKEMON_USER").ok())?
            .set_override_option("auth.password", env::var("POKEMON_PASS").ok())?
            .set_override_option("auth.jwt_secret", env::var("SECRET_KEY").ok())?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Defaults for everything except the signing secret, which has to be
    /// supplied explicitly.
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", "development")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("auth.username", "operator")?
            .set_default("auth.password", "operator")?
            .set_default("auth.token_ttl_minutes", 10)?
            .set_default("upstream.base_url", DEFAULT_BASE_URL)?
            .set_default("audit.actions_path", "logs/user_actions.log")?
            .set_default("audit.errors_path", "logs/user_errors.log")?
            .set_default("cors.enabled", true)?
            .set_default("cors.allow_any_origin", false)?
            .set_default("cors.max_age", 3600)
    }

    /// Startup preconditions that deserialization alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set (SECRET_KEY or APP_AUTH__JWT_SECRET)".into(),
            ));
        }
        if self.auth.token_ttl_minutes <= 0 || self.auth.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_minutes must be between 1 and {}",
                MAX_TOKEN_TTL_MINUTES
            )));
        }
        if self.server.workers == 0 {
            return Err(ConfigError::Message("server.workers must be at least 1".into()));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn new_for_test() -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .set_default("environment", "test")?
            .set_default("auth.jwt_secret", "test_secret")?
            .set_default("auth.username", "ash")?
            .set_default("auth.password", "pikachu")?
            .build()?
            .try_deserialize()
    }
}
