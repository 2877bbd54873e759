mod cli;
mod controller;
mod input;
mod logging;
mod model;
mod mpd;
mod view;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use cli::CliArgs;
use controller::AppController;
use input::{commands::register_all, load_config_file, load_defaults, Dispatcher};
use model::AppModel;
use mpd::MpdEvent;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== pms-rs starting ===");

    let model = AppModel::new();
    let mut dispatcher = Dispatcher::new();
    register_all(&mut dispatcher, &model)?;
    load_defaults(&mut dispatcher)?;

    if let Some(path) = args.config_path() {
        match load_config_file(&mut dispatcher, &path) {
            Ok(errors) => {
                if let Some(first) = errors.first() {
                    model.ui.borrow_mut().set_error(format!(
                        "{}: {first} ({} errors)",
                        path.display(),
                        errors.len()
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read configuration");
                model
                    .ui
                    .borrow_mut()
                    .set_error(format!("Cannot read {}: {e}", path.display()));
            }
        }
    }

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut controller = AppController::new(
        model.clone(),
        dispatcher,
        args.key_timeout(),
        args.server(),
        events_tx,
    );
    controller.connect();

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &model, &mut controller, events_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown();

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("pms-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &AppModel,
    controller: &mut AppController,
    mut events: UnboundedReceiver<MpdEvent>,
) -> io::Result<()> {
    loop {
        controller.tick(Instant::now());

        while let Ok(event) = events.try_recv() {
            controller.handle_mpd_event(event);
        }

        let redraw = std::mem::take(&mut model.ui.borrow_mut().redraw);
        if redraw {
            terminal.clear()?;
        }

        terminal.draw(|f| AppView::render(f, model))?;

        if model.ui.borrow().should_quit {
            break;
        }

        // Short poll keeps the watcher's events and the key timeout responsive
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key);
            }
        }

        // Let the idle watcher task make progress
        tokio::task::yield_now().await;
    }

    Ok(())
}
