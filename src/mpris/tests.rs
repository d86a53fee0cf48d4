use super::*;
use std::sync::mpsc;

#[test]
fn playback_status_maps_states_to_mpris_strings() {
    assert_eq!(playback_status_str(PlaybackState::Playing), "Playing");
    assert_eq!(playback_status_str(PlaybackState::Paused), "Paused");
    assert_eq!(playback_status_str(PlaybackState::Stopped), "Stopped");
    // An empty catalog reads as Stopped on the bus.
    assert_eq!(playback_status_str(PlaybackState::Empty), "Stopped");
}

#[test]
fn handle_updates_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_playback(PlaybackState::Playing);
    handle.set_title(Some("a.mp3".to_string()));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.playback, PlaybackState::Playing);
        assert_eq!(s.title.as_deref(), Some("a.mp3"));
    }

    handle.set_title(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
    }
}

#[test]
fn metadata_contains_title_key() {
    let state = Arc::new(Mutex::new(SharedState {
        playback: PlaybackState::Playing,
        title: Some("Title".to_string()),
    }));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
}

#[test]
fn transport_methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert!(matches!(got[0], ControlCmd::PlayPause));
    assert!(matches!(got[1], ControlCmd::Next));
    assert!(matches!(got[2], ControlCmd::Prev));
    assert!(matches!(got[3], ControlCmd::Stop));
}
