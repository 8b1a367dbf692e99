use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AppError, ProxyError};
use super::models::{PokemonDetail, TypeListing};

/// Public PokeAPI root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Lookups against the Pokémon data service.
///
/// Both calls return `None` for every failure: non-success status,
/// network error, undecodable body, and (for type listings) an empty
/// result. Callers cannot and should not tell these apart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn fetch_by_name(&self, name: &str) -> Option<PokemonDetail>;
    async fn fetch_names_by_type(&self, pokemon_type: &str) -> Option<Vec<String>>;
}

/// reqwest-backed client. Clone is cheap and shares the connection pool.
/// One attempt per call, with the transport's default timeouts.
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::ConfigError(format!("invalid upstream base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::ConfigError(format!("upstream base url {} cannot carry a path", base_url)));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| AppError::InternalError(format!("failed to build http client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// `{base_url}/{resource}/{key}` with `key` percent-encoded as one segment.
    fn endpoint(&self, resource: &str, key: &str) -> Result<Url, ProxyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(resource)
            .push(key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProxyError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Status(status));
        }

        Ok(response.json::<T>().await?)
    }

    async fn lookup_by_name(&self, name: &str) -> Result<PokemonDetail, ProxyError> {
        let url = self.endpoint("pokemon", name)?;
        self.get_json(url).await
    }

    async fn lookup_names_by_type(&self, pokemon_type: &str) -> Result<Vec<String>, ProxyError> {
        let url = self.endpoint("type", pokemon_type)?;
        let names = self.get_json::<TypeListing>(url).await?.into_names();
        if names.is_empty() {
            return Err(ProxyError::Empty);
        }
        Ok(names)
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn fetch_by_name(&self, name: &str) -> Option<PokemonDetail> {
        match self.lookup_by_name(name).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!("Upstream lookup for pokemon {} failed: {}", name, e);
                None
            }
        }
    }

    async fn fetch_names_by_type(&self, pokemon_type: &str) -> Option<Vec<String>> {
        match self.lookup_names_by_type(pokemon_type).await {
            Ok(names) => Some(names),
            Err(e) => {
                warn!("Upstream lookup for type {} failed: {}", pokemon_type, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = PokeApiClient::new(DEFAULT_BASE_URL).unwrap();
        let url = client.endpoint("pokemon", "pikachu").unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/pikachu");

        let client = PokeApiClient::new("https://pokeapi.co/api/v2/").unwrap();
        let url = client.endpoint("type", "fire").unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/type/fire");
    }

    #[test]
    fn test_endpoint_encodes_key() {
        let client = PokeApiClient::new("http://localhost:8080").unwrap();
        let url = client.endpoint("pokemon", "mr mime/../x").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/pokemon/mr%20mime%2F..%2Fx");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(PokeApiClient::new("not a url"), Err(AppError::ConfigError(_))));
        assert!(matches!(PokeApiClient::new("mailto:ash@example.com"), Err(AppError::ConfigError(_))));
    }
}
