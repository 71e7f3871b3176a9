//! In-memory routes: `/` for the list and `/pokemon/:name` for a detail page

use std::fmt;

use serde::{Deserialize, Serialize};

const DETAIL_PREFIX: &str = "/pokemon/";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    #[default]
    List,
    Detail { name: String },
}

impl Route {
    pub fn detail(name: impl Into<String>) -> Self {
        Route::Detail { name: name.into() }
    }

    /// Parse a path. The `:name` segment is kept verbatim.
    pub fn parse(path: &str) -> Option<Self> {
        if path == "/" || path.is_empty() {
            return Some(Route::List);
        }
        let name = path.strip_prefix(DETAIL_PREFIX)?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Route::detail(name))
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail { name } => format!("{DETAIL_PREFIX}{name}"),
        }
    }

    pub fn detail_name(&self) -> Option<&str> {
        match self {
            Route::Detail { name } => Some(name),
            Route::List => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Route::List)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
