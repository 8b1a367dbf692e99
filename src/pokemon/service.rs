use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::AuditLog;
use crate::error::AppError;
use crate::pokemon::selection::{longest_name, pick_random, RandomSource};
use crate::proxy::{PokemonDetail, PokemonSource};

pub const MISSING_NAME: &str = "No Pokémon name provided";
pub const MISSING_TYPE: &str = "No Pokémon type provided";
pub const POKEMON_NOT_FOUND: &str = "Could not find the Pokémon";
pub const TYPE_NOT_FOUND: &str = "No Pokémon found for the given type";

/// Response of the search route. Only the first listed type is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response of the roulette and longest-name routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub types: String,
    pub id: i64,
}

impl From<PokemonDetail> for PokemonSummary {
    fn from(detail: PokemonDetail) -> Self {
        let types = detail.type_names().collect::<Vec<_>>().join(" / ");
        Self {
            name: detail.name,
            types,
            id: detail.id,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Strategy {
    Random,
    Longest,
}

/// Business logic behind the protected routes. Callers are expected to
/// have resolved the username through `AuthService::authorize` already.
pub struct PokedexService {
    source: Arc<dyn PokemonSource>,
    random: Arc<dyn RandomSource>,
    audit: Arc<dyn AuditLog>,
}

impl PokedexService {
    pub fn new(
        source: Arc<dyn PokemonSource>,
        random: Arc<dyn RandomSource>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self { source, random, audit }
    }

    pub async fn search(&self, username: &str, pokemon_name: Option<&str>) -> Result<SearchResult, AppError> {
        let Some(name) = pokemon_name.filter(|n| !n.is_empty()) else {
            return Err(self.reject(username, MISSING_NAME, AppError::ValidationError(MISSING_NAME.into())));
        };

        let detail = self.source.fetch_by_name(name).await;
        // A detail without any type cannot be projected and counts as missing
        let Some((detail, kind)) = detail.and_then(|d| {
            let kind = d.type_names().next()?.to_string();
            Some((d, kind))
        }) else {
            return Err(self.not_found(username, name));
        };

        info!("User {} searched for {}", username, name);
        self.audit.record_action(username, &format!("Pokémon search: {}", name));

        Ok(SearchResult {
            name: detail.name,
            id: detail.id,
            kind,
        })
    }

    pub async fn roulette(&self, username: &str, pokemon_type: Option<&str>) -> Result<PokemonSummary, AppError> {
        let (chosen, detail) = self.pick_from_type(username, pokemon_type, Strategy::Random).await?;
        self.audit.record_action(username, &format!("Pokémon roulette: {}", chosen));
        Ok(detail.into())
    }

    pub async fn longest_name(&self, username: &str, pokemon_type: Option<&str>) -> Result<PokemonSummary, AppError> {
        let (chosen, detail) = self.pick_from_type(username, pokemon_type, Strategy::Longest).await?;
        self.audit.record_action(username, &format!("Longest name: {}", chosen));
        Ok(detail.into())
    }

    /// Lists the type, selects one name and looks it up. Returns the chosen
    /// name alongside its detail.
    async fn pick_from_type(
        &self,
        username: &str,
        pokemon_type: Option<&str>,
        strategy: Strategy,
    ) -> Result<(String, PokemonDetail), AppError> {
        let Some(pokemon_type) = pokemon_type.filter(|t| !t.is_empty()) else {
            return Err(self.reject(username, MISSING_TYPE, AppError::ValidationError(MISSING_TYPE.into())));
        };

        let names = self.source.fetch_names_by_type(pokemon_type).await.unwrap_or_default();
        let chosen = match strategy {
            Strategy::Random => pick_random(&names, self.random.as_ref()),
            Strategy::Longest => longest_name(&names),
        };
        let Some(chosen) = chosen.map(str::to_string) else {
            return Err(self.reject(
                username,
                &format!("No Pokémon data for type {}", pokemon_type),
                AppError::NotFound(TYPE_NOT_FOUND.into()),
            ));
        };

        info!("User {} drew {} from type {} ({:?})", username, chosen, pokemon_type, strategy);

        // The listing and the per-name lookup can disagree
        match self.source.fetch_by_name(&chosen).await {
            Some(detail) => Ok((chosen, detail)),
            None => Err(self.not_found(username, &chosen)),
        }
    }

    fn not_found(&self, username: &str, name: &str) -> AppError {
        self.reject(
            username,
            &format!("Could not find Pokémon {}", name),
            AppError::NotFound(POKEMON_NOT_FOUND.into()),
        )
    }

    fn reject(&self, username: &str, audit_message: &str, err: AppError) -> AppError {
        self.audit.record_error(username, audit_message);
        err
    }
}
