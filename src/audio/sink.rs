//! Utilities for creating `rodio` sinks from fetched media bytes.
//!
//! The helper here encapsulates downloading a track and preparing a
//! paused `Sink` ready to play it.

use std::io::Cursor;

use reqwest::blocking::Client;
use rodio::{Decoder, OutputStream, Sink};

use super::types::{AudioError, PlayRequest};

/// Download the track's bytes and prepare a paused `Sink` for them.
///
/// The whole file is buffered in memory before decoding; catalog entries
/// are individual songs, not long-running streams.
pub(super) fn create_sink(
    handle: &OutputStream,
    http: &Client,
    request: &PlayRequest,
) -> Result<Sink, AudioError> {
    let response = http.get(&request.url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::BadStatus(status.as_u16()));
    }
    let bytes = response.bytes()?.to_vec();

    let source = Decoder::new(Cursor::new(bytes))?;

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
