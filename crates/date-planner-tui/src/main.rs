//! Date Planner: a terminal wizard for planning a date.
//!
//! Walk through each category (flowers, activity, food, vibe), either
//! committing one pick per category or swiping through every card, add some
//! notes, then download the plan or email it.

mod app;
mod handler;
mod input;
mod tui;
mod ui;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use date_planner_core::{Catalog, Config, Flow};

use crate::app::App;
use crate::tui::{EventHandler, Tui, TICK_RATE};

#[derive(Parser)]
#[command(name = "date-planner")]
#[command(about = "Plan a date in the terminal and send the plan by email", version)]
struct Cli {
    /// Selection flow: "submit" (one pick per category) or "swipe" (like/pass every card)
    #[arg(long, value_parser = parse_flow)]
    flow: Option<Flow>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the option images
    #[arg(long)]
    images: Option<PathBuf>,

    /// JSON catalog to use instead of the built-in categories
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn parse_flow(s: &str) -> Result<Flow, String> {
    Flow::from_str(s).ok_or_else(|| format!("unknown flow '{}', expected submit or swipe", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log.as_deref())?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(flow) = cli.flow {
        config.flow = Some(flow);
    }
    if let Some(images) = cli.images {
        config.images_dir = Some(images);
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    info!(
        config = ?cli.config.or_else(|| Config::get_config_path().ok()),
        catalog = ?config.catalog_path,
        "loaded settings"
    );

    let mut app = App::new(config, catalog);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    terminal.show_cursor()?;

    info!("planner closed");
    result
}

async fn run_app(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}

/// Log to a file: the terminal UI owns stderr. `RUST_LOG` picks the level.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => dirs::cache_dir()
            .ok_or_else(|| anyhow!("Could not determine cache directory"))?
            .join("date-planner")
            .join("date-planner.log"),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flow() {
        let cli = Cli::try_parse_from(["date-planner", "--flow", "swipe", "--images", "pics"]).unwrap();
        assert_eq!(cli.flow, Some(Flow::Swipe));
        assert_eq!(cli.images, Some(PathBuf::from("pics")));
    }

    #[test]
    fn test_cli_rejects_unknown_flow() {
        assert!(Cli::try_parse_from(["date-planner", "--flow", "tinder"]).is_err());
    }
}
