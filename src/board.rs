use ndarray::Array2;

use crate::*;

/// Single coordinate axis used for board width, height and positions.
pub type Axis = u8;

/// Count type for mines and tile totals.
pub type TileCount = u16;

/// Two-dimensional board position `(x, y)`.
pub type GridPos = (Axis, Axis);

pub(crate) const fn mult(a: Axis, b: Axis) -> TileCount {
    (a as TileCount).saturating_mul(b as TileCount)
}

pub(crate) const fn nd(pos: GridPos) -> [usize; 2] {
    [pos.0 as usize, pos.1 as usize]
}

const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The square grid of tiles for one round. Owns bounds checking and neighbor
/// enumeration; tiles never move, the whole board is dropped with the round.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    size: Axis,
    tiles: Array2<Tile>,
}

impl Board {
    pub fn new(size: Axis) -> Self {
        Self {
            size,
            tiles: Array2::default(nd((size, size))),
        }
    }

    pub const fn size(&self) -> Axis {
        self.size
    }

    pub const fn total_tiles(&self) -> TileCount {
        mult(self.size, self.size)
    }

    pub fn validate(&self, pos: GridPos) -> Result<GridPos> {
        if pos.0 < self.size && pos.1 < self.size {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn tile(&self, pos: GridPos) -> &Tile {
        &self.tiles[nd(pos)]
    }

    pub(crate) fn tile_mut(&mut self, pos: GridPos) -> &mut Tile {
        &mut self.tiles[nd(pos)]
    }

    /// Row-major iteration over every position.
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + use<> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| (x, y)))
    }

    /// The existing tiles around `pos`, fewer than 8 at edges and corners.
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + use<> {
        let size = self.size;
        NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
            let x = pos.0.checked_add_signed(dx)?;
            let y = pos.1.checked_add_signed(dy)?;
            (x < size && y < size).then_some((x, y))
        })
    }

    /// Neighbor tiles whose kind is anything but `Neutral`.
    pub fn adjacent_mines(&self, pos: GridPos) -> u8 {
        self.neighbors(pos)
            .filter(|&p| !matches!(self.tile(p).kind, TileKind::Neutral))
            .count() as u8
    }
}
