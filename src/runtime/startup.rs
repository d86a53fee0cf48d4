use crate::catalog::CatalogFetcher;
use crate::config;
use crate::runtime::event_loop::EventLoopState;

/// Queue the initial catalog fetch so the UI comes up immediately and the
/// track list fills in when the listing arrives.
pub fn request_initial_catalog(
    fetcher: &mut CatalogFetcher,
    state: &mut EventLoopState,
    settings: &config::Settings,
) {
    state.fetching = true;
    state.pending_autoplay = settings.playback.autoplay;
    fetcher.request();
}
