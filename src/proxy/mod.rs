//! Proxy module for the Pokédex gateway
//!
//! This module talks to the external Pokémon data service and reduces
//! every kind of upstream failure to a plain "no data" outcome.

mod client;
pub mod models;

pub use client::{PokeApiClient, PokemonSource, DEFAULT_BASE_URL};
pub use models::{PokemonDetail, TypeListing};

#[cfg(test)]
pub use client::MockPokemonSource;
