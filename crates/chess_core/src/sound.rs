/// Audio hook the board calls after every real (non-simulated) move.
///
/// Playback is fire-and-forget; implementations must not hold on to board state.
pub trait SoundEffects: Send + Sync {
    fn play(&self, capture: bool);
}

/// Default collaborator that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundEffects for Silent {
    fn play(&self, _capture: bool) {}
}
