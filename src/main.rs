//! memegle - a gif search engine for your terminal
//!
//! Browse trending GIFs and search GIPHY by keyword, either interactively in a
//! terminal UI or with one-shot commands that print to stdout.

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use memegle::api::GifService;
use memegle::app::{App, AppState};
use memegle::cache::{self, TrendingCache};
use memegle::cli::{self, Action, Cli};
use memegle::config::Config;
use memegle::ui;

/// Log file written while the TUI owns the terminal
const LOG_FILE_NAME: &str = "memegle.log";

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Installs the tracing subscriber
///
/// One-shot commands log to stderr. The TUI logs to a file in the cache
/// directory; if that file cannot be opened, logging is disabled.
fn init_logging(interactive: bool, log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memegle=info"));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return;
    }

    let Some(dir) = log_dir else {
        return;
    };
    let file = fs::create_dir_all(dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE_NAME))
    });
    if let Ok(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.state {
        AppState::Home => ui::render_home(frame),
        AppState::Search => ui::render_search(frame, app),
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Runs the interactive TUI until the user quits
async fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        // Run queued loads after drawing so the loading state is visible
        if app.pending.is_some() {
            app.process_pending().await;
            continue;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let action = Action::from_cli(&cli)?;
    let config = Config::from_env()?;

    let interactive = action == Action::Interactive;
    init_logging(interactive, cache::cache_dir(&config).as_deref());

    let store = cache::open_store(&config, cli.no_cache);
    let trending_cache = TrendingCache::new(store, config.cache.clone());
    let service = GifService::new(&config, trending_cache);

    if interactive {
        return run_tui(App::new(service)).await;
    }

    let output = cli::execute(&action, &service).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
