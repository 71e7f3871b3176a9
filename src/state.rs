//! Application state - single source of truth

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::{Config, DetailLayout, Endpoints, PageRequest};
use crate::pixmap::Pixmap;
use crate::route::Route;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const CARD_WIDTH: u16 = 20;
pub const CARD_HEIGHT: u16 = 4;
pub const PREVIEW_WIDTH: u16 = 34;
/// Below this terminal width the list drops its preview pane.
pub const PREVIEW_MIN_WIDTH: u16 = 80;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub official_artwork: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base_value: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityDetail {
    pub id: u32,
    pub name: String,
    /// Decimeters
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub sprites: Sprites,
    pub types: Vec<String>,
    pub abilities: Vec<Ability>,
    pub stats: Vec<Stat>,
}

impl EntityDetail {
    pub fn stat(&self, name: &str) -> Option<&Stat> {
        self.stats.iter().find(|stat| stat.name == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageTarget {
    Preview,
    Artwork,
}

/// One image shown by a view, keyed by the URL it was requested from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageSlot {
    pub url: Option<String>,
    pub image: DataResource<Pixmap>,
}

impl Default for ImageSlot {
    fn default() -> Self {
        Self {
            url: None,
            image: DataResource::Empty,
        }
    }
}

impl ImageSlot {
    /// Point the slot at `url`. Returns the URL to fetch when a load is needed.
    pub fn request(&mut self, url: Option<String>) -> Option<String> {
        if self.url == url && !self.image.is_empty() && !self.image.is_failed() {
            return None;
        }
        self.image = if url.is_some() {
            DataResource::Loading
        } else {
            DataResource::Empty
        };
        self.url = url.clone();
        url
    }

    pub fn accepts(&self, url: &str) -> bool {
        self.url.as_deref() == Some(url)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub visible_rows: usize,
}

impl GridGeometry {
    pub fn for_area(width: u16, height: u16) -> Self {
        Self {
            columns: (width / CARD_WIDTH).max(1) as usize,
            visible_rows: (height / CARD_HEIGHT).max(1) as usize,
        }
    }

    pub fn total_rows(&self, len: usize) -> usize {
        len.div_ceil(self.columns)
    }

    pub fn max_scroll(&self, len: usize) -> usize {
        self.total_rows(len).saturating_sub(self.visible_rows)
    }

    /// Nearest first row to `scroll_row` that keeps `selected` on screen.
    pub fn scroll_to(&self, len: usize, selected: usize, scroll_row: usize) -> usize {
        let row = selected / self.columns;
        let scroll_row = if row < scroll_row {
            row
        } else if row >= scroll_row + self.visible_rows {
            row + 1 - self.visible_rows
        } else {
            scroll_row
        };
        scroll_row.min(self.max_scroll(len))
    }
}

/// Split a list body width into (grid width, preview width).
pub fn list_panes(width: u16) -> (u16, u16) {
    if width >= PREVIEW_MIN_WIDTH {
        (width - PREVIEW_WIDTH, PREVIEW_WIDTH)
    } else {
        (width, 0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListState {
    pub entries: DataResource<Vec<CatalogEntry>>,
    pub selected: usize,
    /// First visible grid row
    pub scroll_row: usize,
    /// Scroll row recorded when a card was opened, restored after the next load
    pub saved_scroll_row: usize,
    pub preview: ImageSlot,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            entries: DataResource::Empty,
            selected: 0,
            scroll_row: 0,
            saved_scroll_row: 0,
            preview: ImageSlot::default(),
        }
    }
}

impl ListState {
    pub fn entries(&self) -> &[CatalogEntry] {
        self.entries.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.entries().get(self.selected)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries().iter().position(|entry| entry.name == name)
    }

    /// Clamp the selection and scroll so the selected card is on screen.
    pub fn ensure_visible(&mut self, grid: GridGeometry) {
        let len = self.entries().len();
        if len == 0 {
            self.selected = 0;
            self.scroll_row = 0;
            return;
        }
        self.selected = self.selected.min(len - 1);
        self.scroll_row = grid.scroll_to(len, self.selected, self.scroll_row);
    }

    /// Apply the saved scroll row once, pulling the selection into view.
    pub fn restore_scroll(&mut self, grid: GridGeometry) -> bool {
        if self.saved_scroll_row == 0 {
            return false;
        }
        let len = self.entries().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.scroll_row = self.saved_scroll_row.min(grid.max_scroll(len));
        self.saved_scroll_row = 0;
        let row = self.selected / grid.columns;
        if row < self.scroll_row || row >= self.scroll_row + grid.visible_rows {
            self.selected = (self.scroll_row * grid.columns).min(len.saturating_sub(1));
        }
        true
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailState {
    pub entity: DataResource<EntityDetail>,
    pub artwork: ImageSlot,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            entity: DataResource::Empty,
            artwork: ImageSlot::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub endpoints: Endpoints,
    pub page: PageRequest,
    pub layout: DetailLayout,
    pub route: Route,
    pub history: Vec<Route>,
    pub list: ListState,
    pub detail: DetailState,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            terminal_size: (80, 24),
            endpoints: config.endpoints.clone(),
            page: config.page,
            layout: config.layout,
            route: config.start_route.clone(),
            history: Vec::new(),
            list: ListState::default(),
            detail: DetailState::default(),
            tick: 0,
        }
    }

    /// Card grid for the current terminal size.
    pub fn grid(&self) -> GridGeometry {
        let (width, height) = self.terminal_size;
        let body = height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT);
        let (grid_width, _) = list_panes(width);
        GridGeometry::for_area(grid_width, body)
    }

    pub fn current_detail(&self) -> Option<&EntityDetail> {
        self.route.detail_name()?;
        self.detail.entity.data()
    }

    pub fn is_loading(&self) -> bool {
        match self.route {
            Route::List => self.list.entries.is_loading(),
            Route::Detail { .. } => self.detail.entity.is_loading(),
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Route")
                .entry("path", ron_string(&self.route.path()))
                .entry(
                    "history",
                    ron_string(&self.history.iter().map(Route::path).collect::<Vec<_>>()),
                )
                .entry("layout", ron_string(&self.layout)),
            DebugSection::new("List")
                .entry("entries", ron_string(&self.list.entries().len()))
                .entry("loading", ron_string(&self.list.entries.is_loading()))
                .entry("error", ron_string(&self.list.entries.error()))
                .entry("selected", ron_string(&self.list.selected))
                .entry("scroll_row", ron_string(&self.list.scroll_row))
                .entry("saved_scroll_row", ron_string(&self.list.saved_scroll_row))
                .entry("preview", ron_string(&self.list.preview.url)),
            DebugSection::new("Detail")
                .entry(
                    "entity",
                    ron_string(&self.detail.entity.data().map(|detail| detail.name.clone())),
                )
                .entry("loading", ron_string(&self.detail.entity.is_loading()))
                .entry("error", ron_string(&self.detail.entity.error()))
                .entry("artwork", ron_string(&self.detail.artwork.url)),
        ]
    }
}
