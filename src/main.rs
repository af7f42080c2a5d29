mod app;
mod config;
mod data;
mod error;
mod pipeline;
mod ui;

use app::App;
use color_eyre::eyre::WrapErr;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use data::BybitClient;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "perfboard.log";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let path = config::config_path();
    let cfg = config::load_config(&path);
    info!(path = %path.display(), symbols = cfg.watchlist.len(), "loaded config");

    let client = match cfg.request_timeout_secs {
        Some(secs) => BybitClient::with_timeout(&cfg.base_url, Duration::from_secs(secs))
            .wrap_err("building HTTP client")?,
        None => BybitClient::with_base_url(&cfg.base_url),
    };

    info!(base_url = client.base_url(), "using market data endpoint");

    let mut terminal = setup_terminal()?;
    let mut app = App::new(client, cfg);
    let result = app.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    if let Err(e) = config::save_config(&path, &app.config()) {
        warn!(error = %e, "could not save config");
    }

    result.wrap_err("dashboard loop failed")
}

fn init_tracing() -> color_eyre::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .wrap_err_with(|| format!("opening {LOG_FILE}"))?;

    // The terminal belongs to the UI, so logs go to a file.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
