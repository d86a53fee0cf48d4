use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioOutput;
use crate::catalog::{CatalogClient, CatalogFetcher};
use crate::mpris::ControlCmd;
use crate::player::Player;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let client = CatalogClient::new(&settings.server)?;
    let fetch_client = client.clone();
    let mut fetcher = CatalogFetcher::spawn(move || fetch_client.fetch_catalog());

    let audio = AudioOutput::new(&settings.server);
    let mut player = Player::new();

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &player);

    let mut state = event_loop::EventLoopState::new();
    startup::request_initial_catalog(&mut fetcher, &mut state, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut player,
        &client,
        &mut fetcher,
        &audio,
        &mpris,
        &control_tx,
        &control_rx,
        &mut state,
    );

    audio.quit();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
