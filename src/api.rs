//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::pixmap::Pixmap;
use crate::state::{Ability, CatalogEntry, EntityDetail, Sprites, Stat};

pub const LIST_STATUS_MESSAGE: &str = "Failed to fetch Pokémon";
pub const DETAIL_STATUS_MESSAGE: &str = "Pokémon not found";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("response parse error: {0}")]
    Parse(String),
    #[error("image decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message shown to the user. Status failures use the view's fixed text.
    pub fn user_message(&self, status_message: &str) -> String {
        match self {
            ApiError::Status(_) => status_message.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    sprites: SpritesResponse,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct SpritesResponse {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<OtherSprites>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<ArtworkSprites>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct ArtworkSprites {
    front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u32,
    stat: NamedResource,
}

pub async fn fetch_catalog(url: &str) -> Result<Vec<CatalogEntry>, ApiError> {
    let bytes = fetch_bytes(url).await?;
    parse_catalog(&bytes)
}

pub async fn fetch_entity(url: &str) -> Result<EntityDetail, ApiError> {
    let bytes = fetch_bytes(url).await?;
    parse_entity(&bytes)
}

pub async fn fetch_image(url: &str) -> Result<Pixmap, ApiError> {
    let bytes = fetch_bytes(url).await?;
    Pixmap::decode(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<CatalogEntry>, ApiError> {
    let response: ListResponse =
        serde_json::from_slice(bytes).map_err(|err| ApiError::Parse(err.to_string()))?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| CatalogEntry {
            name: entry.name,
            url: entry.url,
        })
        .collect())
}

pub fn parse_entity(bytes: &[u8]) -> Result<EntityDetail, ApiError> {
    let response: PokemonResponse =
        serde_json::from_slice(bytes).map_err(|err| ApiError::Parse(err.to_string()))?;

    let official_artwork = response
        .sprites
        .other
        .and_then(|other| other.official_artwork)
        .and_then(|artwork| artwork.front_default);

    Ok(EntityDetail {
        id: response.id,
        name: response.name,
        height: response.height,
        weight: response.weight,
        sprites: Sprites {
            front_default: response.sprites.front_default,
            official_artwork,
        },
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| Ability {
                name: slot.ability.name,
                is_hidden: slot.is_hidden,
            })
            .collect(),
        stats: response
            .stats
            .into_iter()
            .map(|slot| Stat {
                name: slot.stat.name,
                base_value: slot.base_stat,
            })
            .collect(),
    })
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ApiError> {
    tracing::debug!(%url, "GET");
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "non-success response");
        return Err(ApiError::Status(status.as_u16()));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    Ok(bytes.to_vec())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "sprites": {
            "front_default": "https://example.test/sprites/1.png",
            "back_default": null,
            "other": {
                "dream_world": { "front_default": null },
                "official-artwork": { "front_default": "https://example.test/art/1.png" }
            }
        },
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } },
            { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "https://pokeapi.co/api/v2/ability/65/" }, "is_hidden": false, "slot": 1 },
            { "ability": { "name": "chlorophyll", "url": "https://pokeapi.co/api/v2/ability/34/" }, "is_hidden": true, "slot": 3 }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "https://pokeapi.co/api/v2/stat/4/" } }
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let body = br#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2",
            "previous": null,
            "results": [
                { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
                { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
            ]
        }"#;
        let entries = parse_catalog(body).expect("parse");
        assert_eq!(
            entries,
            vec![
                CatalogEntry {
                    name: "bulbasaur".into(),
                    url: "https://pokeapi.co/api/v2/pokemon/1/".into(),
                },
                CatalogEntry {
                    name: "ivysaur".into(),
                    url: "https://pokeapi.co/api/v2/pokemon/2/".into(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_entity_merges_nested_fields() {
        let detail = parse_entity(BULBASAUR.as_bytes()).expect("parse");
        assert_eq!(detail.id, 1);
        assert_eq!(detail.height, 7);
        assert_eq!(detail.weight, 69);
        assert_eq!(detail.types, vec!["grass".to_string(), "poison".to_string()]);
        assert_eq!(
            detail.sprites.official_artwork.as_deref(),
            Some("https://example.test/art/1.png")
        );
        assert_eq!(
            detail.abilities,
            vec![
                Ability {
                    name: "overgrow".into(),
                    is_hidden: false,
                },
                Ability {
                    name: "chlorophyll".into(),
                    is_hidden: true,
                },
            ]
        );
        assert_eq!(detail.stats[1].name, "special-attack");
        assert_eq!(detail.stats[1].base_value, 65);
    }

    #[test]
    fn test_parse_entity_without_artwork() {
        let body = br#"{
            "id": 10001,
            "name": "deoxys-attack",
            "height": 17,
            "weight": 608,
            "sprites": { "front_default": "https://example.test/sprites/10001.png", "other": null },
            "types": [],
            "abilities": [],
            "stats": []
        }"#;
        let detail = parse_entity(body).expect("parse");
        assert_eq!(detail.sprites.official_artwork, None);
        assert_eq!(
            detail.sprites.front_default.as_deref(),
            Some("https://example.test/sprites/10001.png")
        );
    }

    #[test]
    fn test_parse_errors_are_typed() {
        let err = parse_entity(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
        assert!(parse_catalog(br#"{"results": 3}"#).is_err());
    }

    #[test]
    fn test_user_message_collapses_status() {
        assert_eq!(
            ApiError::Status(404).user_message(DETAIL_STATUS_MESSAGE),
            "Pokémon not found"
        );
        assert_eq!(
            ApiError::Transport("connection refused".into()).user_message(LIST_STATUS_MESSAGE),
            "request failed: connection refused"
        );
    }
}
