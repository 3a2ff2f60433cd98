use std::path::PathBuf;
use std::time::Duration;

use crate::mpris::MprisHandle;
use crate::playlist::{PlaybackEngine, PlaybackState, PlayerView, PlaylistController};

/// The parts of the controller that MPRIS shows. The track path is part of
/// it: deleting the current track can load another one at the same index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MprisSnapshot {
    index: Option<usize>,
    track: Option<PathBuf>,
    playback: PlaybackState,
    length: Option<Duration>,
}

impl MprisSnapshot {
    pub fn of<E: PlaybackEngine, V: PlayerView>(controller: &PlaylistController<E, V>) -> Self {
        Self {
            index: controller.current_index(),
            track: controller.current_track().map(|t| t.path.clone()),
            playback: controller.state(),
            length: controller.engine().duration(),
        }
    }
}

pub fn update_mpris<E: PlaybackEngine, V: PlayerView>(
    mpris: &MprisHandle,
    controller: &PlaylistController<E, V>,
    placeholder_cover: &str,
) {
    mpris.set_track_metadata(
        controller.current_index(),
        controller.current_track(),
        placeholder_cover,
    );
    mpris.set_length(controller.engine().duration());
    mpris.set_playback(controller.state());
}

/// Republish to MPRIS if anything it shows has changed since `last`.
/// Returns whether an update was sent.
pub fn sync_mpris<E: PlaybackEngine, V: PlayerView>(
    mpris: &MprisHandle,
    controller: &PlaylistController<E, V>,
    placeholder_cover: &str,
    last: &mut MprisSnapshot,
) -> bool {
    let now = MprisSnapshot::of(controller);
    if now == *last {
        return false;
    }
    update_mpris(mpris, controller, placeholder_cover);
    *last = now;
    true
}
