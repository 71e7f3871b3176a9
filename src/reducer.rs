//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::config::DetailLayout;
use crate::effect::Effect;
use crate::format;
use crate::route::Route;
use crate::state::{list_panes, AppState, DetailState, ImageTarget, Sprites};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.tick = 0;
            let effects = enter_route(state);
            with_effects(effects)
        }

        // ===== List =====
        Action::ListFetch => {
            if state.list.entries.is_loading() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(fetch_catalog(state))
        }

        Action::ListDidLoad(entries) => {
            state.list.entries = DataResource::Loaded(entries);
            let grid = state.grid();
            if !state.list.restore_scroll(grid) {
                state.list.ensure_visible(grid);
            }
            with_effects(preview_effects(state))
        }

        Action::ListDidError(error) => {
            tracing::warn!(%error, "catalog fetch failed");
            state.list.entries = DataResource::Failed(error);
            state.list.preview.clear();
            DispatchResult::changed()
        }

        Action::ListSelect(index) => select_entry(state, index),

        Action::ListMove(columns, rows) => {
            let grid = state.grid();
            let delta = i64::from(columns) + i64::from(rows) * grid.columns as i64;
            move_selection(state, delta)
        }

        Action::ListPage(pages) => {
            let grid = state.grid();
            let delta = i64::from(pages) * (grid.visible_rows * grid.columns) as i64;
            move_selection(state, delta)
        }

        Action::ListJumpTop => select_entry(state, 0),

        Action::ListJumpBottom => {
            let last = state.list.entries().len().saturating_sub(1);
            select_entry(state, last)
        }

        Action::ListOpen => {
            let Some(entry) = state.list.selected_entry() else {
                return DispatchResult::unchanged();
            };
            let route = Route::detail(entry.name.clone());
            navigate(state, route)
        }

        // ===== Routing =====
        Action::Navigate(route) => navigate(state, route),

        Action::NavigateBack => {
            if state.route.is_list() && state.history.is_empty() {
                return DispatchResult::unchanged();
            }
            state.route = state.history.pop().unwrap_or_default();
            with_effects(enter_route(state))
        }

        // ===== Detail =====
        Action::DetailDidLoad { name, detail } => {
            if state.route.detail_name() != Some(name.as_str()) {
                tracing::debug!(%name, "dropping stale detail response");
                return DispatchResult::unchanged();
            }
            let artwork = artwork_url(state.layout, &detail.sprites);
            state.detail.entity = DataResource::Loaded(detail);
            let effects = state
                .detail
                .artwork
                .request(artwork)
                .map(|url| Effect::FetchImage {
                    target: ImageTarget::Artwork,
                    url,
                })
                .into_iter()
                .collect();
            with_effects(effects)
        }

        Action::DetailDidError { name, error } => {
            if state.route.detail_name() != Some(name.as_str()) {
                tracing::debug!(%name, "dropping stale detail error");
                return DispatchResult::unchanged();
            }
            tracing::warn!(%name, %error, "detail fetch failed");
            state.detail.entity = DataResource::Failed(error);
            state.detail.artwork.clear();
            DispatchResult::changed()
        }

        Action::DetailStep(delta) => {
            let Some(current) = state.route.detail_name() else {
                return DispatchResult::unchanged();
            };
            let Some(index) = state.list.position_of(current) else {
                return DispatchResult::unchanged();
            };
            let next = index as i64 + i64::from(delta);
            let len = state.list.entries().len() as i64;
            if next < 0 || next >= len || next == index as i64 {
                return DispatchResult::unchanged();
            }
            let next = next as usize;
            let Some(entry) = state.list.entries().get(next) else {
                return DispatchResult::unchanged();
            };
            state.route = Route::detail(entry.name.clone());
            state.list.selected = next;
            let grid = state.grid();
            state.list.ensure_visible(grid);
            with_effects(enter_route(state))
        }

        // ===== Images =====
        Action::ImageDidLoad { target, url, image } => {
            let slot = match target {
                ImageTarget::Preview => &mut state.list.preview,
                ImageTarget::Artwork => &mut state.detail.artwork,
            };
            if !slot.accepts(&url) {
                return DispatchResult::unchanged();
            }
            slot.image = DataResource::Loaded(image);
            DispatchResult::changed()
        }

        Action::ImageDidError { target, url, error } => {
            let slot = match target {
                ImageTarget::Preview => &mut state.list.preview,
                ImageTarget::Artwork => &mut state.detail.artwork,
            };
            if !slot.accepts(&url) {
                return DispatchResult::unchanged();
            }
            tracing::warn!(%url, %error, "image load failed");
            slot.image = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            let grid = state.grid();
            state.list.ensure_visible(grid);
            with_effects(preview_effects(state))
        }

        Action::Tick => {
            let animating = state.is_loading()
                || state.list.preview.image.is_loading()
                || state.detail.artwork.image.is_loading();
            if animating {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn with_effects(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

fn fetch_catalog(state: &mut AppState) -> Effect {
    state.list.entries = DataResource::Loading;
    Effect::FetchCatalog {
        url: state.endpoints.catalog_url(state.page),
    }
}

fn navigate(state: &mut AppState, route: Route) -> DispatchResult<Effect> {
    if route == state.route {
        return DispatchResult::unchanged();
    }
    if state.route.is_list() {
        state.list.saved_scroll_row = state.list.scroll_row;
    }
    let previous = std::mem::replace(&mut state.route, route);
    state.history.push(previous);
    with_effects(enter_route(state))
}

/// Effects needed when the current route becomes active.
fn enter_route(state: &mut AppState) -> Vec<Effect> {
    match state.route.clone() {
        Route::List => {
            state.detail = DetailState::default();
            if state.list.entries.is_empty() {
                vec![fetch_catalog(state)]
            } else {
                preview_effects(state)
            }
        }
        Route::Detail { name } => {
            state.detail = DetailState {
                entity: DataResource::Loading,
                ..DetailState::default()
            };
            let url = state.endpoints.entity_url(&name);
            vec![Effect::FetchEntity { name, url }]
        }
    }
}

/// Thumbnail request for the selected card, when the preview pane is on screen.
fn preview_effects(state: &mut AppState) -> Vec<Effect> {
    let (_, preview_width) = list_panes(state.terminal_size.0);
    if !state.route.is_list() || preview_width == 0 {
        return Vec::new();
    }
    let url = state
        .list
        .selected_entry()
        .and_then(|entry| format::thumbnail_url(&state.endpoints, entry));
    state
        .list
        .preview
        .request(url)
        .map(|url| Effect::FetchImage {
            target: ImageTarget::Preview,
            url,
        })
        .into_iter()
        .collect()
}

fn select_entry(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    let len = state.list.entries().len();
    if index >= len || index == state.list.selected {
        return DispatchResult::unchanged();
    }
    state.list.selected = index;
    let grid = state.grid();
    state.list.ensure_visible(grid);
    with_effects(preview_effects(state))
}

fn move_selection(state: &mut AppState, delta: i64) -> DispatchResult<Effect> {
    let len = state.list.entries().len();
    if len == 0 {
        return DispatchResult::unchanged();
    }
    let target = (state.list.selected as i64 + delta).clamp(0, len as i64 - 1);
    select_entry(state, target as usize)
}

/// The compact layout only knows the default sprite.
fn artwork_url(layout: DetailLayout, sprites: &Sprites) -> Option<String> {
    let url = match layout {
        DetailLayout::Full => format::primary_image(sprites),
        DetailLayout::Compact => sprites.front_default.as_deref().filter(|url| !url.is_empty()),
    };
    url.map(str::to_string)
}
