pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod pokemon;
pub mod proxy;

use std::sync::Arc;
use actix_web::{web, HttpResponse};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use crate::config::Settings;

pub use audit::{AuditLog, FileAuditLog, MemoryAuditLog};
pub use auth::{AuthService, Clock, CredentialStore, SystemClock, TokenService};
pub use pokemon::{PokedexService, RandomSource, ThreadRandom};
pub use proxy::{PokeApiClient, PokemonSource};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Registers every route of the gateway.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/login", web::post().to(auth::handlers::login))
        .route("/search", web::post().to(pokemon::handlers::search))
        .route("/roulette", web::post().to(pokemon::handlers::roulette))
        .route("/longest-name", web::post().to(pokemon::handlers::longest_name));
}

/// Application state shared across all workers. Everything in it is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth: Arc<AuthService>,
    pub pokedex: Arc<PokedexService>,
}

impl AppState {
    /// Production wiring: file audit log, PokeAPI client, system clock and
    /// thread-local randomness.
    pub fn new(config: Settings) -> Result<Self> {
        let audit = Arc::new(FileAuditLog::open(
            &config.audit.actions_path,
            &config.audit.errors_path,
        )?);
        let source = Arc::new(PokeApiClient::new(&config.upstream.base_url)?);

        Self::with_components(config, audit, source, Arc::new(ThreadRandom), Arc::new(SystemClock))
    }

    pub fn with_components(
        config: Settings,
        audit: Arc<dyn AuditLog>,
        source: Arc<dyn PokemonSource>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let tokens = TokenService::from_config(&config.auth, clock)?;
        let credentials = CredentialStore::from_config(&config.auth);

        Ok(Self {
            auth: Arc::new(AuthService::new(credentials, tokens, audit.clone())),
            pokedex: Arc::new(PokedexService::new(source, random, audit)),
            config: Arc::new(config),
        })
    }
}
