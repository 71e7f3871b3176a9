//! Detail profile with artwork and base stat bars

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
use crate::config::DetailLayout;
use crate::format;
use crate::pixmap::PixmapView;
use crate::state::{AppState, EntityDetail, ImageSlot, Stat};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LABEL_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 4;
const ARTWORK_MIN_WIDTH: u16 = 60;

pub struct DetailViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailView;

impl Component<Action> for DetailView {
    type Props<'a> = DetailViewProps<'a>;

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
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    Some(Action::NavigateBack)
                }
                KeyCode::Char('[') | KeyCode::Left => Some(Action::DetailStep(-1)),
                KeyCode::Char(']') | KeyCode::Right => Some(Action::DetailStep(1)),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        match &state.detail.entity {
            DataResource::Loaded(detail) => render_detail(frame, area, state, detail),
            DataResource::Failed(error) => render_error(frame, area, state.layout, error),
            DataResource::Loading | DataResource::Empty => {
                let frame_idx = state.tick as usize % SPINNER.len();
                let line = Line::from(vec![
                    Span::styled(SPINNER[frame_idx], Style::default().fg(ACCENT)),
                    Span::styled(" Loading...", Style::default().fg(TEXT_DIM)),
                ]);
                frame.render_widget(
                    Paragraph::new(line).alignment(Alignment::Center),
                    middle_rows(area, 1),
                );
            }
        }
    }
}

fn middle_rows(area: Rect, height: u16) -> Rect {
    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);
    rows[1]
}

fn render_error(frame: &mut Frame, area: Rect, layout: DetailLayout, error: &str) {
    let mut lines = vec![Line::from(Span::styled(
        error.to_string(),
        Style::default()
            .fg(Color::Rgb(0xef, 0x53, 0x50))
            .add_modifier(Modifier::BOLD),
    ))];
    if layout == DetailLayout::Full {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Esc", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(" Back to List", Style::default().fg(TEXT_DIM)),
        ]));
    }
    let height = lines.len() as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle_rows(area, height),
    );
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState, detail: &EntityDetail) {
    let title = format!(
        " {} #{} ",
        format::capitalize(&detail.name),
        format::padded_id(detail.id)
    );
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .title(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let info_area = if inner.width >= ARTWORK_MIN_WIDTH {
        let columns =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(inner);
        render_artwork(frame, columns[0], &state.detail.artwork);
        columns[1]
    } else {
        inner
    };

    let bar_width = info_area
        .width
        .saturating_sub((LABEL_WIDTH + VALUE_WIDTH + 2) as u16);
    let lines = detail_lines(detail, state.layout, bar_width);
    frame.render_widget(Paragraph::new(lines), info_area);
}

fn render_artwork(frame: &mut Frame, area: Rect, artwork: &ImageSlot) {
    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).split(area);
    match &artwork.image {
        DataResource::Loaded(pixmap) => frame.render_widget(
            PixmapView {
                pixmap,
                background: BG_PANEL,
            },
            rows[0],
        ),
        DataResource::Loading => placeholder(frame, rows[0], "Loading artwork..."),
        DataResource::Failed(_) | DataResource::Empty => placeholder(frame, rows[0], "No image"),
    }
    if let Some(url) = &artwork.url {
        frame.render_widget(
            Paragraph::new(Span::styled(url.clone(), Style::default().fg(TEXT_DIM)))
                .wrap(Wrap { trim: false }),
            rows[1],
        );
    }
}

fn placeholder(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(TEXT_DIM)))
            .alignment(Alignment::Center),
        middle_rows(area, 1),
    );
}

fn badge(text: String, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {text} "),
        Style::default()
            .bg(bg)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

/// Text for the info column. `bar_width` is the room left for stat bars.
pub fn detail_lines(
    detail: &EntityDetail,
    layout: DetailLayout,
    bar_width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut types = vec![Span::styled("Type   ", Style::default().fg(TEXT_DIM))];
    for name in &detail.types {
        types.push(badge(format::capitalize(name), format::type_color(name)));
        types.push(Span::raw(" "));
    }
    lines.push(Line::from(types));
    lines.push(Line::from(vec![
        Span::styled("Height ", Style::default().fg(TEXT_DIM)),
        Span::raw(format::format_height(detail.height)),
        Span::styled("   Weight ", Style::default().fg(TEXT_DIM)),
        Span::raw(format::format_weight(detail.weight)),
    ]));
    lines.push(Line::default());

    if layout == DetailLayout::Full {
        lines.push(heading("Abilities"));
        let mut abilities = Vec::new();
        for ability in &detail.abilities {
            let bg = if ability.is_hidden {
                Color::Rgb(0xb2, 0x8a, 0x00)
            } else {
                Color::Rgb(0xc6, 0x28, 0x28)
            };
            abilities.push(badge(format::ability_label(ability), bg));
            abilities.push(Span::raw(" "));
        }
        lines.push(Line::from(abilities));
        lines.push(Line::default());
    }

    lines.push(heading("Base Stats"));
    match layout {
        DetailLayout::Full => {
            for stat in &detail.stats {
                lines.push(stat_line(stat, bar_width));
            }
        }
        DetailLayout::Compact => {
            for stat in format::COMPACT_STATS
                .iter()
                .filter_map(|name| detail.stat(name))
            {
                lines.push(stat_line(stat, bar_width));
            }
        }
    }
    lines
}

fn stat_line(stat: &Stat, bar_width: u16) -> Line<'static> {
    let color = format::stat_color(&stat.name);
    let filled = format::bar_cells(format::stat_percent(stat.base_value), bar_width);
    let empty = bar_width.saturating_sub(filled);
    Line::from(vec![
        Span::styled(
            format!("{:<width$}", format::stat_label(&stat.name), width = LABEL_WIDTH),
            Style::default().fg(TEXT_DIM),
        ),
        Span::styled(
            format!("{:>width$} ", stat.base_value, width = VALUE_WIDTH - 1),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("█".repeat(filled as usize), Style::default().fg(color)),
        Span::styled(
            "░".repeat(empty as usize),
            Style::default().fg(Color::Rgb(60, 60, 72)),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use crate::state::{Ability, Sprites};
    use tui_dispatch::testing::*;

    fn bulbasaur() -> EntityDetail {
        EntityDetail {
            id: 1,
            name: "bulbasaur".into(),
            height: 7,
            weight: 69,
            sprites: Sprites::default(),
            types: vec!["grass".into(), "poison".into()],
            abilities: vec![
                Ability {
                    name: "overgrow".into(),
                    is_hidden: false,
                },
                Ability {
                    name: "chlorophyll".into(),
                    is_hidden: true,
                },
            ],
            stats: vec![
                Stat {
                    name: "hp".into(),
                    base_value: 45,
                },
                Stat {
                    name: "attack".into(),
                    base_value: 49,
                },
                Stat {
                    name: "defense".into(),
                    base_value: 49,
                },
                Stat {
                    name: "special-attack".into(),
                    base_value: 65,
                },
            ],
        }
    }

    fn render(state: &AppState, width: u16) -> String {
        let mut render = RenderHarness::new(width, 24);
        render.render_to_string_plain(|frame| {
            DetailView.render(
                frame,
                frame.area(),
                DetailViewProps {
                    state,
                    is_focused: true,
                },
            );
        })
    }

    fn loaded(layout: DetailLayout) -> AppState {
        let mut state = AppState {
            route: Route::detail("bulbasaur"),
            layout,
            ..Default::default()
        };
        state.detail.entity = DataResource::Loaded(bulbasaur());
        state
    }

    fn plain(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_back_keys() {
        let state = AppState::default();
        for input in ["esc", "b"] {
            let actions: Vec<_> = DetailView
                .handle_event(
                    &EventKind::Key(key(input)),
                    DetailViewProps {
                        state: &state,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
            actions.assert_first(Action::NavigateBack);
        }
    }

    #[test]
    fn test_render_full_detail() {
        let output = render(&loaded(DetailLayout::Full), 100);

        assert!(output.contains("Bulbasaur #001"));
        assert!(output.contains("Grass"));
        assert!(output.contains("0.7 m"));
        assert!(output.contains("6.9 kg"));
        assert!(output.contains("Chlorophyll (Hidden)"));
        assert!(output.contains("Sp. Attack"));
    }

    #[test]
    fn test_compact_shows_three_stats() {
        let text = plain(&detail_lines(&bulbasaur(), DetailLayout::Compact, 20));

        assert!(text.contains("HP"));
        assert!(text.contains("Defense"));
        assert!(!text.contains("Sp. Attack"));
        assert!(!text.contains("Overgrow"));
    }

    #[test]
    fn test_stat_bar_fill() {
        let line = stat_line(
            &Stat {
                name: "speed".into(),
                base_value: 255,
            },
            10,
        );
        assert!(line.to_string().ends_with(&"█".repeat(10)));
    }

    #[test]
    fn test_error_state_has_no_stats() {
        let mut state = loaded(DetailLayout::Full);
        state.detail.entity = DataResource::Failed("Pokémon not found".into());

        let output = render(&state, 80);
        assert!(output.contains("Pokémon not found"));
        assert!(output.contains("Back to List"));
        assert!(!output.contains("Base Stats"));

        state.layout = DetailLayout::Compact;
        let output = render(&state, 80);
        assert!(!output.contains("Back to List"));
    }

    #[test]
    fn test_loading_spinner() {
        let state = AppState {
            route: Route::detail("bulbasaur"),
            detail: crate::state::DetailState {
                entity: DataResource::Loading,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(render(&state, 60).contains("Loading..."));
    }
}
