//! Session parameters resolved from the command line.

use std::time::Duration;

/// Board, shuffle, and animation pacing settings.
///
/// Defaults: a 4x4 board scrambled by an 80-slide walk at ~30 FPS, with
/// player slides animated slower than shuffle and replay slides.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Board side length N for an NxN grid. Tile ids are `u8`, so 2..=15.
    pub size: usize,
    /// Number of random slides in a shuffle walk.
    pub shuffle_moves: usize,
    /// Target frame duration for the event loop.
    pub frame: Duration,
    /// Frames a player-initiated slide spends animating.
    pub player_frames: u16,
    /// Frames per slide while the shuffle walk plays out.
    pub shuffle_frames: u16,
    /// Frames per slide during reset/solve replays.
    pub replay_frames: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 4,
            shuffle_moves: 80,
            frame: Duration::from_millis(33),
            player_frames: 12,
            shuffle_frames: 3,
            replay_frames: 2,
        }
    }
}
