//! End-to-end rounds driven the way an embedding UI would drive them:
//! description in, actions and ticks through the handler, notifications out.

use hypersweeper::*;

/// View that remembers every notification for assertions.
#[derive(Default)]
struct Recorder {
    tiles: Vec<(GridPos, TileView)>,
    times: Vec<u32>,
    outcomes: Vec<RoundOutcome>,
}

impl RoundView for Recorder {
    fn tile_changed(&mut self, pos: GridPos, view: TileView) {
        self.tiles.push((pos, view));
    }
    fn time_changed(&mut self, remaining: u32) {
        self.times.push(remaining);
    }
    fn flags_changed(&mut self, _used: TileCount, _total: TileCount) {}
    fn attempts_changed(&mut self, _attempts: u32) {}
    fn round_ended(&mut self, outcome: RoundOutcome) {
        self.outcomes.push(outcome);
    }
}

#[test]
fn tier1_corner_opening() {
    let config = GameConfig::parse("1\n10\n150\n0\n").unwrap();

    for seed in 0..16 {
        let mut round = Round::seeded(config, Recorder::default(), seed);
        round.handle((0, 0), Button::Primary).unwrap();

        // the corner and its three neighbors can never hold a mine
        for pos in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(matches!(round.kind_at(pos), TileKind::Neutral));
        }
        assert!(round.state_at((0, 0)).is_revealed());
        let revealed = round
            .view()
            .tiles
            .iter()
            .filter(|(_, view)| matches!(view, TileView::Neutral(_)))
            .count();
        assert!(revealed >= 1);
        assert_ne!(round.outcome(), Some(RoundOutcome::Lost));
    }
}

#[test]
fn tier2_hyper_flag_on_attempt_two_opens_31_tiles() {
    let config = GameConfig::parse("2\n40\n300\n1").unwrap();
    let mut round = Round::seeded(config, Recorder::default(), 99);

    round.handle((8, 8), Button::Primary).unwrap();
    let second = (0..16)
        .flat_map(|y| (0..16).map(move |x| (x, y)))
        .find(|&p| !round.kind_at(p).is_mine() && !round.state_at(p).is_revealed())
        .unwrap();
    round.handle(second, Button::Primary).unwrap();
    assert_eq!(round.attempts(), 2);

    let (hx, hy) = (0..16)
        .flat_map(|y| (0..16).map(move |x| (x, y)))
        .find(|&p| matches!(round.kind_at(p), TileKind::HyperMine))
        .unwrap();
    round.handle((hx, hy), Button::Secondary).unwrap();

    // the full column and row, 16 + 16 - 1 distinct tiles, are now open
    let mut cross: Vec<GridPos> = (0..16)
        .flat_map(|i| [(hx, i), (i, hy)])
        .collect();
    cross.sort_unstable();
    cross.dedup();
    assert_eq!(cross.len(), 31);
    assert!(cross.iter().all(|&p| round.state_at(p).is_revealed()));

    // the hyper mine shows as safely revealed and the round goes on
    assert!(round
        .view()
        .tiles
        .contains(&((hx, hy), TileView::HyperMine { tripped: false })));
    assert!(!round.is_ended());
}

#[test]
fn a_one_second_round_times_out_to_the_computer() {
    let dir = tempfile::tempdir().unwrap();
    let store = RoundStore::new(dir.path());
    let config = GameConfig::new(9, 10, 1, 0).unwrap();
    let mut round = Round::seeded(config, Recorder::default(), 4).with_store(store.clone());

    round.start_timer();
    round.tick();
    round.tick();

    assert!(round.is_ended());
    assert_eq!(round.view().outcomes, vec![RoundOutcome::Lost]);
    assert_eq!(round.view().times, vec![0]);

    let history = store.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].winner, Winner::Computer);
    assert_eq!(history[0].elapsed_secs, 1);
}

#[test]
fn the_history_log_rolls_over_after_five_rounds() {
    let dir = tempfile::tempdir().unwrap();
    let store = RoundStore::new(dir.path());

    for elapsed in 0..6 {
        let config = GameConfig::new(9, 10, 150, 0).unwrap();
        let mut round = Round::seeded(config, (), elapsed).with_store(store.clone());
        round.start_timer();
        for _ in 0..elapsed {
            round.tick();
        }
        round.resign();
    }

    let history = store.history().unwrap();
    let elapsed: Vec<u32> = history.iter().map(|r| r.elapsed_secs).collect();
    assert_eq!(elapsed, vec![5, 4, 3, 2, 1]);
    assert!(history.iter().all(|r| r.winner == Winner::Computer));
}
