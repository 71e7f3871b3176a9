//! Page chrome around the routed view

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::{Component, DetailView, DetailViewProps, ListView, ListViewProps};
use crate::action::Action;
use crate::route::Route;
use crate::state::{AppState, FOOTER_HEIGHT, HEADER_HEIGHT};

pub const TITLE: &str = "Pokédex";

pub const BG_BASE: Color = Color::Rgb(18, 18, 24);
pub const BG_PANEL: Color = Color::Rgb(30, 30, 40);
pub const HEADER_RED: Color = Color::Rgb(0xdc, 0x26, 0x26);
pub const TEXT_MAIN: Color = Color::Rgb(236, 236, 240);
pub const TEXT_DIM: Color = Color::Rgb(150, 150, 165);
pub const ACCENT: Color = Color::Rgb(0xff, 0xcb, 0x05);

/// Split the screen into (header, body, footer).
pub fn shell_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub struct PokedexShellProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Persistent header and footer around the routed view.
pub struct PokedexShell {
    pub list: ListView,
    pub detail: DetailView,
    status_bar: StatusBar,
}

impl Default for PokedexShell {
    fn default() -> Self {
        Self::new()
    }
}

impl PokedexShell {
    pub fn new() -> Self {
        Self {
            list: ListView,
            detail: DetailView,
            status_bar: StatusBar::new(),
        }
    }
}

impl Component<Action> for PokedexShell {
    type Props<'a> = PokedexShellProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let actions: Vec<Action> = match props.state.route {
            Route::List => self
                .list
                .handle_event(
                    event,
                    ListViewProps {
                        state: props.state,
                        is_focused: props.is_focused,
                    },
                )
                .into_iter()
                .collect(),
            Route::Detail { .. } => self
                .detail
                .handle_event(
                    event,
                    DetailViewProps {
                        state: props.state,
                        is_focused: props.is_focused,
                    },
                )
                .into_iter()
                .collect(),
        };
        actions
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let [header, body, footer] = shell_layout(area);
        render_header(frame, header, state);

        match state.route {
            Route::List => self.list.render(
                frame,
                body,
                ListViewProps {
                    state,
                    is_focused: props.is_focused,
                },
            ),
            Route::Detail { .. } => self.detail.render(
                frame,
                body,
                DetailViewProps {
                    state,
                    is_focused: props.is_focused,
                },
            ),
        }

        render_footer(frame, footer, state, &mut self.status_bar);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::bordered()
        .style(Style::default().bg(HEADER_RED).fg(Color::White))
        .border_style(Style::default().fg(Color::Rgb(0x99, 0x1b, 0x1b)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, inner);

    let path = Paragraph::new(Line::from(Span::styled(
        state.route.path(),
        Style::default().fg(Color::Rgb(0xfe, 0xca, 0xca)),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(path, inner);
}

fn status_text(state: &AppState) -> String {
    match &state.route {
        Route::List => {
            if state.list.entries.is_loading() {
                "Loading Pokémon...".to_string()
            } else if state.list.entries.is_failed() {
                "Load failed".to_string()
            } else {
                let len = state.list.entries().len();
                if len == 0 {
                    String::new()
                } else {
                    format!("{}/{}", state.list.selected + 1, len)
                }
            }
        }
        Route::Detail { name } => {
            if state.detail.entity.is_loading() {
                format!("Loading {name}...")
            } else {
                String::new()
            }
        }
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    let mut hints = Vec::new();
    match state.route {
        Route::List => {
            hints.push(StatusBarHint::new("arrows", "Move"));
            hints.push(StatusBarHint::new("Enter", "Open"));
            hints.push(StatusBarHint::new("PgUp/PgDn", "Page"));
            if state.list.entries.is_failed() {
                hints.push(StatusBarHint::new("r", "Retry"));
            } else if state.list.entries.is_loaded() {
                hints.push(StatusBarHint::new("r", "Refresh"));
            }
        }
        Route::Detail { .. } => {
            hints.push(StatusBarHint::new("Esc", "Back"));
            if state.list.entries.is_loaded() {
                hints.push(StatusBarHint::new("[ ]", "Prev/Next"));
            }
        }
    }
    hints.push(StatusBarHint::new("q", "Quit"));
    hints
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = status_text(state);
    let hints = status_hints(state);
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CatalogEntry;
    use tui_dispatch::testing::*;
    use tui_dispatch::DataResource;

    #[test]
    fn test_shell_layout_reserves_header_and_footer() {
        let [header, body, footer] = shell_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, HEADER_HEIGHT);
        assert_eq!(footer.height, FOOTER_HEIGHT);
        assert_eq!(body.height, 24 - HEADER_HEIGHT - FOOTER_HEIGHT);
    }

    #[test]
    fn test_render_header_on_every_route() {
        let mut render = RenderHarness::new(80, 24);
        let mut shell = PokedexShell::new();

        for route in [Route::List, Route::detail("mew")] {
            let state = AppState {
                route: route.clone(),
                ..Default::default()
            };
            let output = render.render_to_string_plain(|frame| {
                shell.render(
                    frame,
                    frame.area(),
                    PokedexShellProps {
                        state: &state,
                        is_focused: true,
                    },
                );
            });
            assert!(output.contains(TITLE));
            assert!(output.contains(&route.path()));
        }
    }

    #[test]
    fn test_events_go_to_active_view() {
        let mut shell = PokedexShell::new();
        let mut state = AppState {
            route: Route::detail("mew"),
            ..Default::default()
        };

        let actions: Vec<_> = shell
            .handle_event(
                &EventKind::Key(key("esc")),
                PokedexShellProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::NavigateBack);

        state.route = Route::List;
        state.list.entries = DataResource::Loaded(vec![CatalogEntry {
            name: "mew".into(),
            url: "https://pokeapi.co/api/v2/pokemon/151/".into(),
        }]);
        let actions: Vec<_> = shell
            .handle_event(
                &EventKind::Key(key("enter")),
                PokedexShellProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::ListOpen);
    }

    #[test]
    fn test_retry_hint_only_on_failure() {
        let mut render = RenderHarness::new(120, 24);
        let mut shell = PokedexShell::new();
        let mut state = AppState::default();

        let mut draw = |state: &AppState| {
            render.render_to_string_plain(|frame| {
                shell.render(
                    frame,
                    frame.area(),
                    PokedexShellProps {
                        state,
                        is_focused: true,
                    },
                );
            })
        };

        assert!(!draw(&state).contains("Retry"));
        state.list.entries = DataResource::Failed("Failed to fetch Pokémon".into());
        assert!(draw(&state).contains("Retry"));
    }
}
