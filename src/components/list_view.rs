//! Catalog grid and the preview pane beside it

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{DataResource, EventKind};

use super::shell::{ACCENT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::format;
use crate::pixmap::PixmapView;
use crate::route::Route;
use crate::state::{list_panes, AppState, GridGeometry, CARD_HEIGHT, CARD_WIDTH};

/// One catalog card as the grid shows it.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub name: String,
    pub label: String,
    /// Zero padded national number, when the URL carries one
    pub number: Option<String>,
    pub route: Route,
    pub image_url: Option<String>,
}

pub fn list_cards(state: &AppState) -> Vec<Card> {
    state
        .list
        .entries()
        .iter()
        .map(|entry| Card {
            name: entry.name.clone(),
            label: format::capitalize(&entry.name),
            number: format::id_from_url(&entry.url)
                .and_then(|id| id.parse::<u32>().ok())
                .map(format::padded_id),
            route: Route::detail(entry.name.clone()),
            image_url: format::thumbnail_url(&state.endpoints, entry),
        })
        .collect()
}

pub struct ListViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Catalog grid with a preview pane for the selected card.
#[derive(Default)]
pub struct ListView;

impl Component<Action> for ListView {
    type Props<'a> = ListViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::ListMove(-1, 0)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::ListMove(1, 0)),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::ListMove(0, -1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::ListMove(0, 1)),
                KeyCode::PageUp => Some(Action::ListPage(-1)),
                KeyCode::PageDown => Some(Action::ListPage(1)),
                KeyCode::Home | KeyCode::Char('g') => Some(Action::ListJumpTop),
                KeyCode::End | KeyCode::Char('G') => Some(Action::ListJumpBottom),
                KeyCode::Enter => Some(Action::ListOpen),
                KeyCode::Char('r') | KeyCode::F(5) if !props.state.list.entries.is_loading() => {
                    Some(Action::ListFetch)
                }
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::ListMove(0, *delta as i16)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let (grid_width, preview_width) = list_panes(area.width);
        let chunks = Layout::horizontal([
            Constraint::Length(grid_width),
            Constraint::Length(preview_width),
        ])
        .split(area);

        match &state.list.entries {
            DataResource::Loaded(_) => {
                let cards = list_cards(state);
                render_cards(frame, chunks[0], state, &cards);
                if preview_width > 0 {
                    let selected = cards.get(state.list.selected);
                    render_preview(frame, chunks[1], state, selected);
                }
            }
            DataResource::Loading => render_skeletons(frame, chunks[0], state),
            DataResource::Failed(error) => render_error(frame, area, error),
            DataResource::Empty => {
                let hint = Paragraph::new(Line::from(Span::styled(
                    "Press r to load the catalog",
                    Style::default().fg(TEXT_DIM),
                )))
                .alignment(Alignment::Center);
                frame.render_widget(hint, centered_line(area));
            }
        }
    }
}

/// Rect of the grid slot at `slot`, counted from the top-left visible card.
fn card_rect(area: Rect, grid: GridGeometry, slot: usize) -> Option<Rect> {
    let col = (slot % grid.columns) as u16;
    let row = (slot / grid.columns) as u16;
    if row as usize >= grid.visible_rows {
        return None;
    }
    let rect = Rect::new(
        area.x + col * CARD_WIDTH,
        area.y + row * CARD_HEIGHT,
        CARD_WIDTH,
        CARD_HEIGHT,
    );
    (rect.right() <= area.right() && rect.bottom() <= area.bottom()).then_some(rect)
}

fn render_cards(frame: &mut Frame, area: Rect, state: &AppState, cards: &[Card]) {
    let grid = GridGeometry::for_area(area.width, area.height);
    let scroll_row = grid.scroll_to(cards.len(), state.list.selected, state.list.scroll_row);
    let first = scroll_row * grid.columns;
    for (slot, (index, card)) in cards.iter().enumerate().skip(first).enumerate() {
        let Some(rect) = card_rect(area, grid, slot) else {
            break;
        };
        let selected = index == state.list.selected;
        let border = if selected {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let mut label = Style::default().add_modifier(Modifier::BOLD);
        if selected {
            label = label.fg(ACCENT);
        }
        let lines = vec![
            Line::from(Span::styled(card.label.clone(), label)),
            Line::from(Span::styled(
                card.number
                    .as_deref()
                    .map(|number| format!("#{number}"))
                    .unwrap_or_default(),
                Style::default().fg(TEXT_DIM),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            rect,
        );
    }
}

/// Placeholder cards, one per requested entry, pulsing while the page loads.
fn render_skeletons(frame: &mut Frame, area: Rect, state: &AppState) {
    let grid = GridGeometry::for_area(area.width, area.height);
    let shades = [Color::Rgb(48, 48, 60), Color::Rgb(70, 70, 86)];
    for slot in 0..state.page.limit as usize {
        let Some(rect) = card_rect(area, grid, slot) else {
            break;
        };
        let phase = (state.tick as usize / 3 + slot) % shades.len();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(shades[phase]))
            .style(Style::default().bg(BG_PANEL));
        let bar = "\u{2591}".repeat(CARD_WIDTH.saturating_sub(6) as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                bar,
                Style::default().fg(shades[phase]),
            )))
            .alignment(Alignment::Center)
            .block(block),
            rect,
        );
    }
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Error: {error}"),
            Style::default()
                .fg(Color::Rgb(0xef, 0x53, 0x50))
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(TEXT_DIM)),
            Span::styled("r", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(" to retry", Style::default().fg(TEXT_DIM)),
        ]),
    ];
    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}

fn render_preview(frame: &mut Frame, area: Rect, state: &AppState, card: Option<&Card>) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(TEXT_DIM))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .title(" Preview ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(card) = card else {
        return;
    };

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .split(inner);

    let mut title = vec![Span::styled(
        card.label.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(number) = &card.number {
        title.push(Span::styled(
            format!("  #{number}"),
            Style::default().fg(TEXT_DIM),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(title)).alignment(Alignment::Center),
        rows[0],
    );

    let preview = &state.list.preview;
    match &preview.image {
        DataResource::Loaded(pixmap) => frame.render_widget(
            PixmapView {
                pixmap,
                background: BG_PANEL,
            },
            rows[1],
        ),
        DataResource::Loading => placeholder(frame, rows[1], "Loading image..."),
        DataResource::Failed(_) | DataResource::Empty => placeholder(frame, rows[1], "No image"),
    }

    if let Some(url) = &card.image_url {
        frame.render_widget(
            Paragraph::new(Span::styled(url.clone(), Style::default().fg(TEXT_DIM)))
                .wrap(Wrap { trim: false }),
            rows[2],
        );
    }
}

fn placeholder(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(TEXT_DIM)))
            .alignment(Alignment::Center),
        centered_line(area),
    );
}

fn centered_line(area: Rect) -> Rect {
    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);
    rows[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CatalogEntry;
    use tui_dispatch::testing::*;

    fn loaded_state(names: &[&str]) -> AppState {
        let entries = names
            .iter()
            .enumerate()
            .map(|(i, name)| CatalogEntry {
                name: name.to_string(),
                url: format!("https://pokeapi.co/api/v2/pokemon/{}/", i + 1),
            })
            .collect();
        let mut state = AppState::default();
        state.list.entries = DataResource::Loaded(entries);
        state
    }

    fn events(state: &AppState, input: &str, is_focused: bool) -> Vec<Action> {
        ListView
            .handle_event(
                &EventKind::Key(key(input)),
                ListViewProps { state, is_focused },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_list_cards_route_and_thumbnail() {
        let state = loaded_state(&["bulbasaur", "ivysaur", "venusaur"]);
        let cards = list_cards(&state);

        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].label, "Ivysaur");
        assert_eq!(cards[1].number.as_deref(), Some("002"));
        assert!(cards[1].route.path().contains("ivysaur"));
        assert!(cards[1]
            .image_url
            .as_deref()
            .is_some_and(|url| url.contains("/2.png")));
    }

    #[test]
    fn test_navigation_keys() {
        let state = loaded_state(&["bulbasaur"]);
        events(&state, "j", true).assert_first(Action::ListMove(0, 1));
        events(&state, "h", true).assert_first(Action::ListMove(-1, 0));
        events(&state, "enter", true).assert_first(Action::ListOpen);
    }

    #[test]
    fn test_retry_ignored_while_loading() {
        let mut state = AppState::default();
        state.list.entries = DataResource::Loading;
        events(&state, "r", true).assert_empty();

        state.list.entries = DataResource::Failed("Failed to fetch Pokémon".into());
        let actions = events(&state, "r", true);
        actions.assert_count(1);
        actions.assert_first(Action::ListFetch);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let state = loaded_state(&["bulbasaur"]);
        events(&state, "enter", false).assert_empty();
    }

    #[test]
    fn test_render_cards_and_preview() {
        let mut render = RenderHarness::new(100, 20);
        let state = loaded_state(&["bulbasaur", "ivysaur"]);

        let output = render.render_to_string_plain(|frame| {
            ListView.render(
                frame,
                frame.area(),
                ListViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Bulbasaur"));
        assert!(output.contains("Ivysaur"));
        assert!(output.contains("#002"));
        assert!(output.contains("Preview"));
    }

    #[test]
    fn test_render_keeps_selected_card_in_wide_grid() {
        let names: Vec<String> = (1..=50).map(|i| format!("mon-{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = loaded_state(&names);
        // Scroll worked out against the default 80x24 grid of two columns.
        state.list.selected = 20;
        state.list.scroll_row = 6;

        let mut render = RenderHarness::new(200, 42);
        let output = render.render_to_string_plain(|frame| {
            ListView.render(
                frame,
                frame.area(),
                ListViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert_eq!(output.matches("Mon-21 ").count(), 2);
        assert!(output.contains("Mon-1 "));
    }

    #[test]
    fn test_render_loading_shows_skeletons_only() {
        let mut render = RenderHarness::new(60, 20);
        let mut state = AppState::default();
        state.list.entries = DataResource::Loading;

        let output = render.render_to_string_plain(|frame| {
            ListView.render(
                frame,
                frame.area(),
                ListViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains('\u{2591}'));
        assert!(!output.contains('#'));
    }

    #[test]
    fn test_render_error_offers_retry() {
        let mut render = RenderHarness::new(60, 20);
        let mut state = AppState::default();
        state.list.entries = DataResource::Failed("Failed to fetch Pokémon".into());

        let output = render.render_to_string_plain(|frame| {
            ListView.render(
                frame,
                frame.area(),
                ListViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Error: Failed to fetch Pokémon"));
        assert!(output.contains("to retry"));
    }
}
