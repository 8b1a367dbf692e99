//! Upstream payload shapes. Only the fields the gateway reads are modelled;
//! everything else in the upstream documents is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

impl PokemonDetail {
    /// Type names in upstream order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|slot| slot.kind.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEntry {
    pub pokemon: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeListing {
    #[serde(default)]
    pub pokemon: Vec<PokemonEntry>,
}

impl TypeListing {
    pub fn into_names(self) -> Vec<String> {
        self.pokemon.into_iter().map(|entry| entry.pokemon.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_ignores_extra_fields_and_keeps_type_order() {
        let detail: PokemonDetail = serde_json::from_value(json!({
            "id": 6,
            "name": "charizard",
            "height": 17,
            "types": [
                {"slot": 1, "type": {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}},
                {"slot": 2, "type": {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"}}
            ]
        }))
        .unwrap();

        assert_eq!(detail.id, 6);
        assert_eq!(detail.type_names().collect::<Vec<_>>(), vec!["fire", "flying"]);
    }

    #[test]
    fn test_type_listing_names() {
        let listing: TypeListing = serde_json::from_value(json!({
            "name": "flying",
            "pokemon": [
                {"slot": 2, "pokemon": {"name": "pidgey", "url": "u"}},
                {"slot": 2, "pokemon": {"name": "pidgeotto", "url": "u"}}
            ]
        }))
        .unwrap();

        assert_eq!(listing.into_names(), vec!["pidgey", "pidgeotto"]);
    }
}
