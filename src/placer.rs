use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// One placed mine, in the order placement produced it: hyper mines come
/// first, matching the layout snapshot format.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineSpot {
    pub pos: GridPos,
    pub hyper: bool,
}

/// Scatters the configured mines over every tile except the safe set, the
/// anchor plus its existing neighbors. Shuffling only the non-safe pool and
/// appending the safe set at the back means the mine slots, drawn from the
/// front, can never land on it.
pub(crate) fn scatter(
    board: &Board,
    config: &GameConfig,
    anchor: GridPos,
    rng: &mut SmallRng,
) -> Vec<MineSpot> {
    let mut safe: Vec<GridPos> = vec![anchor];
    safe.extend(board.neighbors(anchor));

    let mut pool: Vec<GridPos> = board.positions().filter(|p| !safe.contains(p)).collect();
    pool.shuffle(rng);
    pool.extend_from_slice(&safe);

    let hyper = config.hyper_mines as usize;
    pool.iter()
        .take(config.mines as usize)
        .enumerate()
        .map(|(i, &pos)| MineSpot {
            pos,
            hyper: i < hyper,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn scatter_with(seed: u64, config: &GameConfig, anchor: GridPos) -> Vec<MineSpot> {
        let board = Board::new(config.size);
        let mut rng = SmallRng::seed_from_u64(seed);
        scatter(&board, config, anchor, &mut rng)
    }

    #[test]
    fn never_mines_the_anchor_or_its_neighbors() {
        let config = GameConfig::new(9, 11, 150, 0).unwrap();
        let board = Board::new(config.size);

        for seed in 0..32 {
            for anchor in [(0, 0), (4, 4), (8, 3)] {
                let mut safe: Vec<GridPos> = vec![anchor];
                safe.extend(board.neighbors(anchor));

                let spots = scatter_with(seed, &config, anchor);
                assert!(spots.iter().all(|spot| !safe.contains(&spot.pos)));
            }
        }
    }

    #[test]
    fn places_the_configured_counts_hyper_first() {
        let config = GameConfig::new(16, 40, 300, 1).unwrap();
        let spots = scatter_with(7, &config, (8, 8));

        assert_eq!(spots.len(), 40);
        assert!(spots[0].hyper);
        assert!(spots[1..].iter().all(|spot| !spot.hyper));
    }

    #[test]
    fn never_uses_a_position_twice() {
        let config = GameConfig::new(16, 45, 300, 1).unwrap();
        let mut positions: Vec<GridPos> = scatter_with(3, &config, (0, 15))
            .iter()
            .map(|spot| spot.pos)
            .collect();
        positions.sort_unstable();
        positions.dedup();

        assert_eq!(positions.len(), 45);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(9, 10, 150, 0).unwrap();

        assert_eq!(
            scatter_with(42, &config, (4, 4)),
            scatter_with(42, &config, (4, 4))
        );
    }
}
