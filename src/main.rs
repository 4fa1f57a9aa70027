//! CineSearch - terminal movie discovery backed by TMDB
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! cinesearch
//!
//! # CLI mode (for automation)
//! cinesearch search "blade runner" --year 1982
//! cinesearch discover --genre 878 --min-rating 7 --sort vote-average-desc
//! cinesearch info 335984 --json
//! ```
//!
//! Credentials come from `TMDB_API_KEY` / `TMDB_READ_ACCESS_TOKEN` or the
//! config file.

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use cinesearch::api::TmdbClient;
use cinesearch::app::{Action, App, Message};
use cinesearch::cli::{Cli, Command, ExitCode, Output};
use cinesearch::commands;
use cinesearch::config::Config;
use cinesearch::coordinator::{FetchPlan, Intent, RequestToken};
use cinesearch::logging;
use cinesearch::models::ImageSize;
use cinesearch::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_cli(config.log_level());
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(&config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    let client = match config.client() {
        Ok(client) => client,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &client, &output).await,
        Some(Command::Popular(cmd)) => commands::popular_cmd(cmd, &client, &output).await,
        Some(Command::Discover(cmd)) => commands::discover_cmd(cmd, &client, &output).await,
        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &client, &output).await,
        Some(Command::Credits(cmd)) => commands::credits_cmd(cmd, &client, &output).await,
        Some(Command::Genres(cmd)) => commands::genres_cmd(cmd, &client, &output).await,
        Some(Command::Image(cmd)) => commands::image_cmd(cmd, &client, &output),
        // handled by is_cli_mode
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(config: &Config) -> Result<()> {
    // Fail on missing credentials before touching the terminal
    let client = Arc::new(config.client()?);
    let _log_guard = logging::init_tui(config.log_level())?;
    info!(base_url = client.base_url(), "starting TUI");

    let mut terminal = init_terminal()?;
    let mut app = App::new();

    let result = run_event_loop(&mut terminal, &mut app, client).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, applies fetch results, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, client: Arc<TmdbClient>) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (tx, mut rx) = mpsc::unbounded_channel();
    dispatch(Action::Browse(Intent::InitialLoad), app, &client, &tx);

    let mut title = String::new();

    while app.running {
        drain_messages(&mut rx, app);

        let window_title = app.window_title();
        if window_title != title {
            execute!(terminal.backend_mut(), SetTitle(&window_title))?;
            title = window_title;
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = app.handle_key(key) {
                        dispatch(action, app, &client, &tx);
                    }
                }
            }
        }
    }

    Ok(())
}

fn drain_messages(rx: &mut UnboundedReceiver<Message>, app: &mut App) {
    while let Ok(msg) = rx.try_recv() {
        app.handle_message(msg);
    }
}

// =============================================================================
// Fetch Tasks
// =============================================================================

/// Turn an action into background fetches that report back over `tx`
fn dispatch(action: Action, app: &mut App, client: &Arc<TmdbClient>, tx: &UnboundedSender<Message>) {
    match action {
        Action::Browse(intent) => {
            let plan = app.view.apply(intent);
            debug!(
                token = plan.token,
                endpoint = plan.endpoint.name(),
                page = plan.page,
                "dispatching fetch"
            );
            spawn_plan(plan, Arc::clone(client), tx.clone());
        }
        Action::OpenMovie(token, id) => spawn_detail(token, id, Arc::clone(client), tx.clone()),
    }
}

fn spawn_plan(plan: FetchPlan, client: Arc<TmdbClient>, tx: UnboundedSender<Message>) {
    if plan.load_genres {
        let client = Arc::clone(&client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let genres = client.genres().await;
            // receiver gone means the UI has exited
            let _ = tx.send(Message::Genres(genres));
        });
    }

    tokio::spawn(async move {
        let page = plan.execute(&client).await;
        let _ = tx.send(Message::Results {
            token: plan.token,
            scroll_to_top: plan.scroll_to_top,
            page,
        });
    });
}

fn spawn_detail(token: RequestToken, id: u64, client: Arc<TmdbClient>, tx: UnboundedSender<Message>) {
    tokio::spawn(async move {
        let (detail, credits) = tokio::join!(client.movie_details(id), client.movie_credits(id));
        let poster_url = client.image_url(
            detail.as_ref().and_then(|d| d.summary.poster_path.as_deref()),
            ImageSize::W500,
        );
        let _ = tx.send(Message::Detail {
            token,
            detail: detail.map(Box::new),
            credits,
            poster_url,
        });
    });
}

