//! Audio worker types and handles.

use thiserror::Error;

use crate::catalog::TrackId;

/// Everything the worker needs to render one track.
#[derive(Debug, Clone)]
pub struct PlayRequest {
    pub id: TrackId,
    /// Fully resolved media URL for the track's bytes.
    pub url: String,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Fetch and start rendering the given track.
    Play(PlayRequest),
    /// Toggle pause/resume of the current sink.
    TogglePause,
    /// Stop playback immediately.
    Stop,
    /// Quit the audio thread.
    Quit,
}

/// Notifications from the worker back to the event loop.
#[derive(Debug)]
pub enum AudioEvent {
    /// The current track played to its natural end.
    Ended { id: TrackId },
    /// The track could not be fetched or decoded.
    Failed { id: TrackId, message: String },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to fetch media: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("media request returned HTTP {0}")]
    BadStatus(u16),

    #[error("failed to decode media: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}
