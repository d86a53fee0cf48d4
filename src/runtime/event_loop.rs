use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioCmd, AudioOutput, PlayRequest};
use crate::catalog::{CatalogClient, CatalogFetcher, FetchOutcome};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlaybackState, Player};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Index of the list cursor, independent of the playing track.
    pub cursor: usize,
    /// Sequence number of the newest catalog fetch already applied.
    /// Older outcomes arriving later are discarded.
    pub last_applied_fetch: u64,
    /// Whether a catalog refresh is in flight.
    pub fetching: bool,
    /// Start the first track once the initial catalog arrives.
    pub pending_autoplay: bool,
    /// Last fetch or playback error, shown in the status box until the
    /// next successful operation.
    pub error: Option<String>,
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            last_applied_fetch: 0,
            fetching: false,
            pending_autoplay: false,
            error: None,
            pending_gg: false,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the
/// fetch and audio workers and MPRIS. Returns `Ok(())` when shutdown is
/// requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player,
    client: &CatalogClient,
    fetcher: &mut CatalogFetcher,
    audio: &AudioOutput,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Some(outcome) = fetcher.try_recv() {
            apply_fetch_outcome(outcome, player, client, audio, mpris, state);
        }

        while let Some(ev) = audio.try_recv_event() {
            handle_audio_event(ev, settings, player, client, audio, mpris, state);
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                player,
                state.cursor,
                state.error.as_deref(),
                state.fetching,
                &settings.ui,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, player, client, audio, mpris, state) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, player, client, audio, mpris, fetcher, control_tx, state) {
                    return Ok(());
                }
            }
        }
    }
}

fn play_request(client: &CatalogClient, track: &crate::catalog::Track) -> PlayRequest {
    PlayRequest {
        id: track.id,
        url: client.media_url(track),
    }
}

/// Ask the audio worker to render the selected track.
fn play_current(player: &Player, client: &CatalogClient, audio: &AudioOutput) {
    if let Some(track) = player.current() {
        let _ = audio.send(AudioCmd::Play(play_request(client, track)));
    }
}

/// Move the list cursor onto the selected track.
fn follow_current(player: &Player, state: &mut EventLoopState) {
    if let Some(pos) = player.current_position() {
        state.cursor = pos;
    }
}

fn clamp_cursor(player: &Player, state: &mut EventLoopState) {
    let len = player.tracks().len();
    if len == 0 {
        state.cursor = 0;
    } else if state.cursor >= len {
        state.cursor = len - 1;
    }
}

/// Move the cursor by `delta` rows, wrapping around both ends.
fn move_cursor(player: &Player, state: &mut EventLoopState, delta: i64) {
    let len = player.tracks().len() as i64;
    if len == 0 {
        return;
    }
    let next = (state.cursor as i64 + delta).rem_euclid(len);
    state.cursor = next as usize;
}

/// What the caller must do after a fetch outcome was folded into the
/// controller and loop state.
#[derive(Debug, PartialEq, Eq)]
enum FetchEffect {
    /// A newer refresh already landed, or the fetch failed; nothing to drive.
    None,
    Applied {
        /// The playing track vanished from the listing; silence the sink too.
        selection_lost: bool,
        /// Autoplay kicked in and selected the first track.
        start_playback: bool,
    },
}

/// Fold a fetch outcome into controller and loop state. Side effects on
/// the audio worker and MPRIS are left to the caller.
fn integrate_fetch_outcome(
    outcome: FetchOutcome,
    player: &mut Player,
    state: &mut EventLoopState,
) -> FetchEffect {
    // A newer refresh has already landed; this listing is stale.
    if outcome.seq <= state.last_applied_fetch {
        return FetchEffect::None;
    }
    state.last_applied_fetch = outcome.seq;
    state.fetching = false;

    match outcome.result {
        Ok(tracks) => {
            state.error = None;

            let had_selection = player.current_id().is_some();
            player.load_catalog(tracks);
            let selection_lost = had_selection && player.current_id().is_none();
            clamp_cursor(player, state);

            let start_playback = std::mem::take(&mut state.pending_autoplay)
                && player.has_tracks()
                && player.current_id().is_none()
                && player.next().is_ok();
            if start_playback {
                follow_current(player, state);
            }

            FetchEffect::Applied {
                selection_lost,
                start_playback,
            }
        }
        Err(e) => {
            // Keep the previous catalog and playback untouched.
            state.error = Some(e.to_string());
            FetchEffect::None
        }
    }
}

fn apply_fetch_outcome(
    outcome: FetchOutcome,
    player: &mut Player,
    client: &CatalogClient,
    audio: &AudioOutput,
    mpris: &MprisHandle,
    state: &mut EventLoopState,
) {
    if let FetchEffect::Applied {
        selection_lost,
        start_playback,
    } = integrate_fetch_outcome(outcome, player, state)
    {
        if selection_lost {
            let _ = audio.send(AudioCmd::Stop);
        }
        if start_playback {
            play_current(player, client, audio);
        }
        update_mpris(mpris, player);
    }
}

fn handle_audio_event(
    ev: crate::audio::AudioEvent,
    settings: &config::Settings,
    player: &mut Player,
    client: &CatalogClient,
    audio: &AudioOutput,
    mpris: &MprisHandle,
    state: &mut EventLoopState,
) {
    match ev {
        crate::audio::AudioEvent::Ended { id } => {
            // A reload or manual skip may have moved the selection since
            // the worker queued this; only act when it is still current.
            if player.current_id() != Some(id) || !player.is_playing() {
                return;
            }
            if settings.playback.advance_on_ended && player.next().is_ok() {
                play_current(player, client, audio);
                follow_current(player, state);
            } else {
                player.stop();
            }
            update_mpris(mpris, player);
        }
        crate::audio::AudioEvent::Failed { id, message } => {
            let name = player
                .tracks()
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| format!("track {id}"));
            state.error = Some(format!("{name}: {message}"));
            // The selection may already have moved on to another track.
            if player.current_id() == Some(id) {
                player.stop();
                update_mpris(mpris, player);
            }
        }
    }
}

/// Apply a transport command from MPRIS or from a forwarded key press.
/// Returns `true` when shutdown is requested.
fn handle_control_cmd(
    cmd: ControlCmd,
    player: &mut Player,
    client: &CatalogClient,
    audio: &AudioOutput,
    mpris: &MprisHandle,
    state: &mut EventLoopState,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => match player.state() {
            PlaybackState::Paused => {
                if player.toggle_play_pause().is_ok() {
                    let _ = audio.send(AudioCmd::TogglePause);
                    update_mpris(mpris, player);
                }
            }
            PlaybackState::Stopped => {
                if player.next().is_ok() {
                    play_current(player, client, audio);
                    follow_current(player, state);
                    update_mpris(mpris, player);
                }
            }
            PlaybackState::Playing | PlaybackState::Empty => {}
        },
        ControlCmd::Pause => {
            if player.state() == PlaybackState::Playing && player.toggle_play_pause().is_ok() {
                let _ = audio.send(AudioCmd::TogglePause);
                update_mpris(mpris, player);
            }
        }
        ControlCmd::PlayPause => match player.state() {
            PlaybackState::Stopped => {
                if player.next().is_ok() {
                    play_current(player, client, audio);
                    follow_current(player, state);
                    update_mpris(mpris, player);
                }
            }
            PlaybackState::Playing | PlaybackState::Paused => {
                if player.toggle_play_pause().is_ok() {
                    let _ = audio.send(AudioCmd::TogglePause);
                    update_mpris(mpris, player);
                }
            }
            PlaybackState::Empty => {}
        },
        ControlCmd::Stop => {
            player.stop();
            let _ = audio.send(AudioCmd::Stop);
            update_mpris(mpris, player);
        }
        ControlCmd::Next => {
            if player.next().is_ok() {
                play_current(player, client, audio);
                follow_current(player, state);
                update_mpris(mpris, player);
            }
        }
        ControlCmd::Prev => {
            if player.previous().is_ok() {
                play_current(player, client, audio);
                follow_current(player, state);
                update_mpris(mpris, player);
            }
        }
    }

    false
}

/// Handle one key press. Returns `true` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
fn handle_key_event(
    key: KeyEvent,
    player: &mut Player,
    client: &CatalogClient,
    audio: &AudioOutput,
    mpris: &MprisHandle,
    fetcher: &mut CatalogFetcher,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                state.cursor = 0;
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            let len = player.tracks().len();
            if len > 0 {
                state.cursor = len - 1;
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            move_cursor(player, state, 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            move_cursor(player, state, -1);
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            let id = player.tracks().get(state.cursor).map(|t| t.id);
            if let Some(id) = id {
                if player.select(id).is_ok() {
                    play_current(player, client, audio);
                    update_mpris(mpris, player);
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('R') => {
            state.pending_gg = false;
            state.fetching = true;
            fetcher.request();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, Track};

    fn t(id: u64, name: &str) -> Track {
        Track {
            id,
            name: name.to_string(),
            path: format!("/audio/{name}"),
        }
    }

    fn ok_outcome(seq: u64, tracks: Vec<Track>) -> FetchOutcome {
        FetchOutcome {
            seq,
            result: Ok(tracks),
        }
    }

    #[test]
    fn stale_fetch_outcomes_are_discarded() {
        let mut player = Player::new();
        let mut state = EventLoopState::new();

        let newer = ok_outcome(2, vec![t(1, "a.mp3"), t(2, "b.mp3")]);
        assert_ne!(
            integrate_fetch_outcome(newer, &mut player, &mut state),
            FetchEffect::None
        );

        // An older request finishing late must not clobber the newer listing.
        let stale = ok_outcome(1, vec![t(9, "stale.mp3")]);
        assert_eq!(
            integrate_fetch_outcome(stale, &mut player, &mut state),
            FetchEffect::None
        );
        assert_eq!(player.tracks().len(), 2);
        assert_eq!(player.tracks()[0].id, 1);
    }

    #[test]
    fn failed_fetch_keeps_catalog_and_playback_untouched() {
        let mut player = Player::new();
        let mut state = EventLoopState::new();

        let loaded = ok_outcome(1, vec![t(1, "a.mp3"), t(2, "b.mp3")]);
        integrate_fetch_outcome(loaded, &mut player, &mut state);
        player.select(2).unwrap();

        let failed = FetchOutcome {
            seq: 2,
            result: Err(CatalogError::BadStatus(503)),
        };
        assert_eq!(
            integrate_fetch_outcome(failed, &mut player, &mut state),
            FetchEffect::None
        );

        assert_eq!(player.tracks().len(), 2);
        assert_eq!(player.current_id(), Some(2));
        assert!(player.is_playing());
        assert!(state.error.as_deref().unwrap().contains("503"));
        assert!(!state.fetching);
    }

    #[test]
    fn reload_that_drops_the_playing_track_requests_audio_stop() {
        let mut player = Player::new();
        let mut state = EventLoopState::new();

        integrate_fetch_outcome(
            ok_outcome(1, vec![t(1, "a.mp3"), t(2, "b.mp3"), t(3, "c.mp3")]),
            &mut player,
            &mut state,
        );
        player.select(3).unwrap();
        state.cursor = 2;

        let effect = integrate_fetch_outcome(
            ok_outcome(2, vec![t(1, "a.mp3")]),
            &mut player,
            &mut state,
        );
        assert_eq!(
            effect,
            FetchEffect::Applied {
                selection_lost: true,
                start_playback: false,
            }
        );
        assert_eq!(player.current_id(), None);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn autoplay_starts_the_first_track_of_the_initial_catalog() {
        let mut player = Player::new();
        let mut state = EventLoopState::new();
        state.pending_autoplay = true;

        let effect = integrate_fetch_outcome(
            ok_outcome(1, vec![t(1, "a.mp3"), t(2, "b.mp3")]),
            &mut player,
            &mut state,
        );
        assert_eq!(
            effect,
            FetchEffect::Applied {
                selection_lost: false,
                start_playback: true,
            }
        );
        assert_eq!(player.current_id(), Some(1));
        assert!(player.is_playing());
        assert!(!state.pending_autoplay);
    }

    #[test]
    fn autoplay_fires_only_once() {
        let mut player = Player::new();
        let mut state = EventLoopState::new();
        state.pending_autoplay = true;

        integrate_fetch_outcome(ok_outcome(1, vec![t(1, "a.mp3")]), &mut player, &mut state);
        player.stop();

        let effect =
            integrate_fetch_outcome(ok_outcome(2, vec![t(1, "a.mp3")]), &mut player, &mut state);
        assert_eq!(
            effect,
            FetchEffect::Applied {
                selection_lost: false,
                start_playback: false,
            }
        );
        assert_eq!(player.current_id(), None);
    }

    #[test]
    fn move_cursor_wraps_around_both_ends() {
        let mut player = Player::new();
        player.load_catalog(vec![t(1, "a.mp3"), t(2, "b.mp3"), t(3, "c.mp3")]);
        let mut state = EventLoopState::new();

        move_cursor(&player, &mut state, -1);
        assert_eq!(state.cursor, 2);
        move_cursor(&player, &mut state, 1);
        assert_eq!(state.cursor, 0);

        // Empty list keeps the cursor pinned.
        let empty = Player::new();
        let mut state = EventLoopState::new();
        move_cursor(&empty, &mut state, 1);
        assert_eq!(state.cursor, 0);
    }
}
