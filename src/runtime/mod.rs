use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::{App, TransportController};
use crate::audio::{BridgeEvent, RodioBridge};
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli_path = env::args_os().nth(1).map(PathBuf::from);
    let (settings, warning) = settings::load_settings(cli_path);

    match logging::init(&settings.log) {
        Ok(Some(path)) => info!(log = %path.display(), "rondo starting"),
        Ok(None) => {}
        Err(e) => eprintln!("rondo: logging disabled: {e}"),
    }
    if let Some(warning) = warning {
        warn!("{warning}");
    }

    let playlist = startup::load_playlist(&settings)?;

    let (events_tx, events_rx) = mpsc::channel::<BridgeEvent>();
    let bridge = RodioBridge::new(events_tx, settings.audio.clone());
    let controller = TransportController::new(
        playlist,
        bridge,
        startup::capabilities(&settings.player),
        settings.player.initial_volume,
    );
    let mut app = App::new(controller, settings.ui.follow_playback);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &events_rx);

    app.controller
        .bridge_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("rondo stopped");
    run_result
}
