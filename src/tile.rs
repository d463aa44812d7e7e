use serde::{Deserialize, Serialize};

/// What a tile is. Assigned exactly once, by mine placement; until then every
/// tile sits at `Unassigned`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Unassigned,
    Neutral,
    Mine,
    HyperMine,
}

impl TileKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::HyperMine)
    }
}

/// Player-visible state of a tile. `Revealed` is terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

impl TileState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) kind: TileKind,
    pub(crate) state: TileState,
    /// Flood-fill visited marker, lives for one round.
    pub(crate) swept: bool,
}

impl Tile {
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    pub const fn state(&self) -> TileState {
        self.state
    }
}
