//! Pokémon lookup routes: search by name, a random pick from a type, and
//! the longest name within a type.

pub mod handlers;
pub mod selection;
mod service;

pub use selection::{longest_name, FixedIndex, RandomSource, ThreadRandom};
pub use service::{
    PokedexService, PokemonSummary, SearchResult, MISSING_NAME, MISSING_TYPE, POKEMON_NOT_FOUND,
    TYPE_NOT_FOUND,
};
