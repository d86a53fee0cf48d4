use thiserror::Error;

use crate::catalog::{Track, TrackId};

/// The playback state of the controller, derived from its fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No catalog loaded, or the catalog is empty.
    #[default]
    Empty,
    /// Tracks available, nothing selected.
    Stopped,
    /// A track is selected but not playing.
    Paused,
    /// A track is selected and playing.
    Playing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    /// Selection target is not in the current catalog. The UI only offers
    /// tracks from the live list, so hitting this is a logic error.
    #[error("track {0} is not in the current catalog")]
    TrackNotFound(TrackId),

    /// Transport action with nothing selected. The UI gates transport
    /// controls when there is no selection.
    #[error("no active track")]
    NoActiveTrack,

    /// next/previous on an empty catalog.
    #[error("the catalog is empty")]
    EmptyCatalog,
}

/// Playlist and transport state: current catalog, selection, playing flag.
///
/// The selection is kept by id, not by position. Positions are recomputed
/// fresh on every call so wrap-around stays correct after a catalog
/// reload changes the track order.
///
/// Fields are private: every mutation goes through the operations below,
/// which uphold two invariants. Playing implies a selection, and an empty
/// catalog implies no selection and not playing.
pub struct Player {
    tracks: Vec<Track>,
    current: Option<TrackId>,
    playing: bool,
}

impl Player {
    /// Create a controller with an empty catalog, nothing selected.
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            current: None,
            playing: false,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn current_id(&self) -> Option<TrackId> {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The selected track, looked up fresh in the catalog.
    pub fn current(&self) -> Option<&Track> {
        let id = self.current?;
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Position of the selected track in catalog order.
    pub fn current_position(&self) -> Option<usize> {
        let id = self.current?;
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn state(&self) -> PlaybackState {
        if self.tracks.is_empty() {
            PlaybackState::Empty
        } else if self.current.is_none() {
            PlaybackState::Stopped
        } else if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Replace the catalog wholesale.
    ///
    /// The selection survives when its id still exists in the new catalog,
    /// along with the playing flag; otherwise it is cleared and playback
    /// stops. Loading an empty catalog is not an error.
    pub fn load_catalog(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        let survives = self
            .current
            .is_some_and(|id| self.tracks.iter().any(|t| t.id == id));
        if !survives {
            self.current = None;
            self.playing = false;
        }
    }

    /// Select `id` and start playing it, from any state.
    pub fn select(&mut self, id: TrackId) -> Result<(), PlayerError> {
        if !self.tracks.iter().any(|t| t.id == id) {
            return Err(PlayerError::TrackNotFound(id));
        }
        self.current = Some(id);
        self.playing = true;
        Ok(())
    }

    /// Flip the playing flag for the selected track.
    pub fn toggle_play_pause(&mut self) -> Result<(), PlayerError> {
        if self.current.is_none() {
            return Err(PlayerError::NoActiveTrack);
        }
        self.playing = !self.playing;
        Ok(())
    }

    /// Advance to the successor of the selection in catalog order,
    /// wrapping to the first track after the last. With nothing selected,
    /// the first track is chosen. Always starts playing.
    pub fn next(&mut self) -> Result<(), PlayerError> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyCatalog);
        }
        let idx = match self.current_position() {
            Some(p) => (p + 1) % self.tracks.len(),
            None => 0,
        };
        self.current = Some(self.tracks[idx].id);
        self.playing = true;
        Ok(())
    }

    /// Symmetric to `next`, wrapping backward. With nothing selected, the
    /// last track is chosen.
    pub fn previous(&mut self) -> Result<(), PlayerError> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyCatalog);
        }
        let len = self.tracks.len();
        let idx = match self.current_position() {
            Some(p) => (p + len - 1) % len,
            None => len - 1,
        };
        self.current = Some(self.tracks[idx].id);
        self.playing = true;
        Ok(())
    }

    /// Clear the selection and stop playback, keeping the catalog.
    pub fn stop(&mut self) {
        self.current = None;
        self.playing = false;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
