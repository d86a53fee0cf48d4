//! Playback controller: the playlist state machine behind the app.
//!
//! The `Player` model lives in `player::model` and owns the current
//! catalog, the selection and the play/pause flag.

mod model;

pub use model::*;
