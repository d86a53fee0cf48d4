use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use reqwest::blocking::Client;
use rodio::{OutputStreamBuilder, Sink};

use crate::catalog::TrackId;
use crate::config::ServerSettings;

use super::sink::create_sink;
use super::types::{AudioCmd, AudioEvent};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    server: ServerSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        // Media downloads get no overall timeout: a whole song is fetched
        // per request and slow links must not cut it short. The connect
        // timeout still bounds unreachable servers.
        let http = match Client::builder()
            .timeout(None)
            .connect_timeout(Duration::from_millis(server.connect_timeout_ms))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                eprintln!("remotune: failed to build media HTTP client: {e}");
                return;
            }
        };

        let mut current: Option<TrackId> = None;
        let mut paused = true;
        let mut sink: Option<Sink> = None;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play(request) => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        match create_sink(&stream, &http, &request) {
                            Ok(new_sink) => {
                                new_sink.play();
                                sink = Some(new_sink);
                                current = Some(request.id);
                                paused = false;
                            }
                            Err(e) => {
                                sink = None;
                                current = None;
                                paused = true;
                                let _ = events.send(AudioEvent::Failed {
                                    id: request.id,
                                    message: e.to_string(),
                                });
                            }
                        }
                    }

                    AudioCmd::TogglePause => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                            } else {
                                s.pause();
                            }
                            paused = !paused;
                        }
                    }

                    AudioCmd::Stop => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        sink = None;
                        current = None;
                        paused = true;
                    }

                    AudioCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Natural end of track: the sink drained while unpaused.
                    if let Some(ref s) = sink {
                        if !paused && s.empty() {
                            let ended = current;
                            sink = None;
                            current = None;
                            paused = true;
                            if let Some(id) = ended {
                                let _ = events.send(AudioEvent::Ended { id });
                            }
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
