use crate::mpris::MprisHandle;
use crate::player::Player;

pub fn update_mpris(mpris: &MprisHandle, player: &Player) {
    mpris.set_title(player.current().map(|t| t.name.clone()));
    mpris.set_playback(player.state());
}
