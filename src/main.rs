//! CoffeeFinder - Terminal Coffee Shop Finder
//!
//! Shows nearby coffee shops in a list and on a map, with brand and distance
//! filters and a light/dark appearance toggle.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use coffeefinder::application::{App, AppMode};
use coffeefinder::infrastructure::{
    AppConfig, Cli, PreferenceStore, SimulatedLocationService, init_tracing,
};
use coffeefinder::presentation::{InputHandler, render_ui};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing::{error, info};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Entry point for the CoffeeFinder terminal application.
///
/// Reads the command line, sets up logging and the terminal, and runs the
/// main event loop until the user quits.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_cli(Cli::parse());
    let _log_guard = init_tracing(&config.log_dir);
    info!(
        preferences = %config.preferences_path.display(),
        status = %config.simulation.initial_status,
        "CoffeeFinder starting"
    );

    let service = SimulatedLocationService::new(config.simulation.clone());
    let mut app = App::new(service, Some(PreferenceStore::new(&config.preferences_path)));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to initialize terminal")?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "Event loop failed");
        println!("{err:?}");
    }

    info!("CoffeeFinder exiting");
    Ok(())
}

/// Main application event loop.
///
/// Redraws, handles at most one key press, then lets the location platform
/// deliver whatever is due. Quits on 'q' from the main screen or Ctrl+C.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    app.start();
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.mode == AppMode::Normal && !app.is_prompting() => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}
