//! Actions: intents from the UI and results from effects

use serde::{Deserialize, Serialize};

use crate::pixmap::Pixmap;
use crate::route::Route;
use crate::state::{CatalogEntry, EntityDetail, ImageTarget};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== List =====
    /// Request the catalog page; also the retry action
    ListFetch,
    ListDidLoad(Vec<CatalogEntry>),
    ListDidError(String),
    ListSelect(usize),
    /// Move the selection by (columns, rows)
    ListMove(i16, i16),
    ListPage(i16),
    ListJumpTop,
    ListJumpBottom,
    ListOpen,

    // ===== Routing =====
    Navigate(Route),
    NavigateBack,

    // ===== Detail =====
    DetailDidLoad { name: String, detail: EntityDetail },
    DetailDidError { name: String, error: String },
    /// Step to the neighbouring catalog entry
    DetailStep(i16),

    // ===== Images =====
    ImageDidLoad { target: ImageTarget, url: String, image: Pixmap },
    ImageDidError { target: ImageTarget, url: String, error: String },

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
