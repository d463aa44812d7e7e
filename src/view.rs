use serde::{Deserialize, Serialize};

use crate::board::{GridPos, TileCount};
use crate::persist::Winner;

/// Render state of a tile as reported to the embedding view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    /// Revealed neutral tile showing its adjacent-mine count.
    Neutral(u8),
    /// Revealed mine; `tripped` only when the reveal loses the round.
    Mine { tripped: bool },
    HyperMine { tripped: bool },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    Lost,
}

impl RoundOutcome {
    pub const fn winner(self) -> Winner {
        match self {
            Self::Won => Winner::Player,
            Self::Lost => Winner::Computer,
        }
    }
}

/// Notification surface consumed by the UI layer.
///
/// The engine never holds a reference back into UI objects; everything a
/// renderer needs arrives through these callbacks, in the order the state
/// changes happen.
pub trait RoundView {
    fn tile_changed(&mut self, pos: GridPos, view: TileView);
    fn time_changed(&mut self, remaining: u32);
    fn flags_changed(&mut self, used: TileCount, total: TileCount);
    fn attempts_changed(&mut self, attempts: u32);
    fn round_ended(&mut self, outcome: RoundOutcome);

    /// Non-fatal trouble, persistence failures mostly.
    fn warning(&mut self, message: &str) {
        log::warn!("{message}");
    }
}

/// Headless rounds run without a view.
impl RoundView for () {
    fn tile_changed(&mut self, _pos: GridPos, _view: TileView) {}
    fn time_changed(&mut self, _remaining: u32) {}
    fn flags_changed(&mut self, _used: TileCount, _total: TileCount) {}
    fn attempts_changed(&mut self, _attempts: u32) {}
    fn round_ended(&mut self, _outcome: RoundOutcome) {}
}
