//! Effects - side effects declared by the reducer

use crate::state::ImageTarget;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch one page of catalog entries
    FetchCatalog { url: String },
    /// Fetch a single entity; `name` is the route key the result belongs to
    FetchEntity { name: String, url: String },
    /// Download and decode an image for a view slot
    FetchImage { target: ImageTarget, url: String },
}
