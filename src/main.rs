mod action;
mod app;
mod command;
mod config;
mod domain;
mod logging;
mod ui;
mod update;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use action::Action;
use app::App;
use command::execute_command;
use config::AppConfig;
use domain::github::{EventsClient, ReqwestTransport, DEFAULT_API_URL};

#[derive(Parser)]
#[command(name = "repofeed")]
#[command(about = "Repofeed - Browse a GitHub repository's public event feed")]
struct Cli {
    /// Repository to prefill: owner/repo (optional)
    target: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "REPOFEED_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long, env = "REPOFEED_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = AppConfig::new(&cli.api_url, cli.log_file.clone(), cli.target.as_deref())?;

    logging::init(config.log_file.as_deref())?;
    tracing::info!("Using API at {}", config.api_url);

    let client = Arc::new(EventsClient::new(
        config.api_url.clone(),
        Arc::new(ReqwestTransport::new()),
    ));

    let mut app = match config.initial.clone() {
        Some(inputs) => App::with_inputs(inputs),
        None => App::new(),
    };

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: Arc<EventsClient>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        // Completed fetches
        while let Ok(action) = rx.try_recv() {
            dispatch(app, action, &client, &tx);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = Action::Input {
                    code: key.code,
                    modifiers: key.modifiers,
                };
                dispatch(app, action, &client, &tx);
            }
        }
    }

    Ok(())
}

/// Apply an action and run the commands it produces in the background
fn dispatch(
    app: &mut App,
    action: Action,
    client: &Arc<EventsClient>,
    tx: &UnboundedSender<Action>,
) {
    for command in update::update(app, action) {
        let client = Arc::clone(client);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(action) = execute_command(command, &client).await {
                let _ = tx.send(action);
            }
        });
    }
}
