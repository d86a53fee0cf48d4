//! MPRIS remote control: media keys and `playerctl` drive the same
//! transport operations as the keyboard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{OwnedValue, Value};

use crate::player::PlaybackState;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.remotune";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

/// Transport intents delivered to the event loop, whether they came from
/// D-Bus or from a forwarded key press.
#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

/// Snapshot of controller state mirrored onto the bus. The event loop
/// pushes updates; the D-Bus thread only reads.
#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
}

/// MPRIS only knows Playing/Paused/Stopped; an empty catalog reads as
/// Stopped.
fn playback_status_str(playback: PlaybackState) -> &'static str {
    match playback {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Empty | PlaybackState::Stopped => "Stopped",
    }
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_title(&self, title: Option<String>) {
        if let Ok(mut s) = self.state.lock() {
            s.title = title;
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No window to raise.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "remotune"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let playback = self
            .state
            .lock()
            .map(|s| s.playback)
            .unwrap_or(PlaybackState::Stopped);
        playback_status_str(playback)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        // The listing carries names only, so the title is all we can offer
        // `playerctl metadata`.
        let title = self
            .state
            .lock()
            .ok()
            .and_then(|s| s.title.clone())
            .unwrap_or_default();

        let mut map = HashMap::new();
        if let Ok(v) = OwnedValue::try_from(Value::from(title)) {
            map.insert("xesam:title".to_string(), v);
        }
        map
    }
}

/// Register the MPRIS service on the session bus from its own thread.
/// Without a bus (headless, no session) the service is skipped with a
/// warning and the rest of the app runs normally.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                eprintln!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                eprintln!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                eprintln!("MPRIS: failed to register player iface: {e}");
                return;
            }

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
