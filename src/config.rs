//! Runtime configuration: endpoints, page size, detail layout, start route

use serde::{Deserialize, Serialize};

use crate::route::Route;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Where catalog data and thumbnails come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Endpoints {
    pub api_base: String,
    pub artwork_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            artwork_base: DEFAULT_ARTWORK_BASE.to_string(),
        }
    }
}

impl Endpoints {
    pub fn catalog_url(&self, page: PageRequest) -> String {
        format!(
            "{}/pokemon?limit={}&offset={}",
            self.api_base.trim_end_matches('/'),
            page.limit,
            page.offset
        )
    }

    pub fn entity_url(&self, name: &str) -> String {
        format!("{}/pokemon/{name}", self.api_base.trim_end_matches('/'))
    }

    pub fn thumbnail_url(&self, id: &str) -> String {
        format!("{}/{id}.png", self.artwork_base.trim_end_matches('/'))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

/// Which detail page to draw.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DetailLayout {
    /// Artwork, ability badges, every stat as a colored bar
    #[default]
    Full,
    /// HP / Attack / Defense only, no ability badges
    Compact,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub endpoints: Endpoints,
    pub page: PageRequest,
    pub layout: DetailLayout,
    pub start_route: Route,
}
