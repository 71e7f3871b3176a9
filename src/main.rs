//! Pokedex TUI - browse the PokeAPI catalog from the terminal

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedex::action::Action;
use pokedex::api::{self, DETAIL_STATUS_MESSAGE, LIST_STATUS_MESSAGE};
use pokedex::components::{shell_layout, Component, PokedexShell, PokedexShellProps};
use pokedex::config::{
    Config, DetailLayout, Endpoints, PageRequest, DEFAULT_API_BASE, DEFAULT_ARTWORK_BASE,
    DEFAULT_PAGE_LIMIT,
};
use pokedex::effect::Effect;
use pokedex::reducer::reducer;
use pokedex::route::Route;
use pokedex::state::{AppState, ImageTarget};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Pokedex TUI - catalog browser for the PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the Pokédex from the terminal")]
struct Args {
    /// Base URL of the PokeAPI REST service
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Base URL for card thumbnails, `{id}.png` is appended
    #[arg(long, default_value = DEFAULT_ARTWORK_BASE)]
    artwork_base: String,

    /// Catalog entries to request
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Catalog offset
    #[arg(long, default_value_t = 0)]
    offset: u32,

    /// Detail page layout
    #[arg(long, value_enum, default_value_t = DetailLayout::Full)]
    layout: DetailLayout,

    /// Initial route, e.g. `/` or `/pokemon/pikachu`
    #[arg(long, default_value = "/", value_parser = parse_route)]
    route: Route,

    /// Write tracing output to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            endpoints: Endpoints {
                api_base: self.api_base.clone(),
                artwork_base: self.artwork_base.clone(),
            },
            page: PageRequest {
                limit: self.limit,
                offset: self.offset,
            },
            layout: self.layout,
            start_route: self.route.clone(),
        }
    }
}

fn parse_route(path: &str) -> Result<Route, String> {
    Route::parse(path).ok_or_else(|| format!("expected `/` or `/pokemon/<name>`, got `{path}`"))
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    List,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    List,
    Detail,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        match self.route {
            Route::List => Some(PokedexComponentId::List),
            Route::Detail { .. } => Some(PokedexComponentId::Detail),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        None
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::List => PokedexContext::List,
            PokedexComponentId::Detail => PokedexContext::Detail,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::List
    }
}

fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "pokedex=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }
    let config = args.config();
    tracing::info!(route = %config.start_route, layout = ?config.layout, "starting");

    let debug = DebugSession::new(args.debug);

    let mut state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(&config))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The bus only forwards resizes, so the grid starts from the real size.
    match terminal.size() {
        Ok(size) => state.terminal_size = (size.width, size.height),
        Err(err) => tracing::warn!(%err, "terminal size unavailable, keeping default"),
    }

    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

struct PokedexUi {
    shell: PokedexShell,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            shell: PokedexShell::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let [_, body, _] = shell_layout(area);
        let (active, inactive) = match state.route {
            Route::List => (PokedexComponentId::List, PokedexComponentId::Detail),
            Route::Detail { .. } => (PokedexComponentId::Detail, PokedexComponentId::List),
        };
        event_ctx.set_component_area(active, body);
        event_ctx.component_areas.remove(&inactive);

        let props = PokedexShellProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.shell.render(frame, area, props);
    }

    fn handle_view_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = PokedexShellProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.shell.handle_event(event, props).into_iter().collect();
        handler_response(actions)
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> =
        EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(PokedexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_view_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail.borrow_mut().handle_view_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            KeyCode::Char('q') => HandlerResponse::action(Action::Quit),
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(90), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchCatalog { url } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::fetch_catalog(&url).await {
                    Ok(entries) => Action::ListDidLoad(entries),
                    Err(err) => Action::ListDidError(err.user_message(LIST_STATUS_MESSAGE)),
                }
            });
        }
        Effect::FetchEntity { name, url } => {
            ctx.tasks().spawn(TaskKey::new("entity"), async move {
                match api::fetch_entity(&url).await {
                    Ok(detail) => Action::DetailDidLoad { name, detail },
                    Err(err) => Action::DetailDidError {
                        name,
                        error: err.user_message(DETAIL_STATUS_MESSAGE),
                    },
                }
            });
        }
        Effect::FetchImage { target, url } => {
            let key = match target {
                ImageTarget::Preview => "image-preview",
                ImageTarget::Artwork => "image-artwork",
            };
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_image(&url).await {
                    Ok(image) => Action::ImageDidLoad { target, url, image },
                    Err(err) => Action::ImageDidError {
                        target,
                        url,
                        error: err.to_string(),
                    },
                }
            });
        }
    }
}
