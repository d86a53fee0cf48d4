use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::config::ServerSettings;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent};

/// Handle to the audio worker thread.
pub struct AudioOutput {
    tx: Sender<AudioCmd>,
    events: Receiver<AudioEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioOutput {
    pub fn new(server: &ServerSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, events) = mpsc::channel::<AudioEvent>();

        let join = spawn_audio_thread(rx, event_tx, server.clone());

        Self {
            tx,
            events,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Poll for a worker notification without blocking.
    pub fn try_recv_event(&self) -> Option<AudioEvent> {
        self.events.try_recv().ok()
    }

    /// Shut the worker down and wait for it to finish.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
