use std::collections::VecDeque;
use std::io;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// The hyper-mine reward only triggers while the player has made this many
/// reveal attempts or fewer.
pub const HYPER_FLAG_ATTEMPT_LIMIT: u32 = 4;

/// The two buttons of the UI's action contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    /// Reveal.
    Primary,
    /// Flag toggle.
    Secondary,
}

/// One playable round: the board, the counters, the countdown and the
/// deferred mine layout. Owns all of them exclusively until it is dropped.
pub struct Round<V> {
    config: GameConfig,
    board: Board,
    view: V,
    store: Option<RoundStore>,
    rng: SmallRng,
    /// Placement result, hyper mines first. `None` until the first reveal.
    mines: Option<Vec<MineSpot>>,
    flags_used: TileCount,
    attempts: u32,
    neutral_remaining: TileCount,
    timer: RoundTimer,
    started: bool,
    ended: bool,
    outcome: Option<RoundOutcome>,
}

impl<V: RoundView> Round<V> {
    /// A fresh round with a randomized mine layout.
    pub fn new(config: GameConfig, view: V) -> Self {
        Self::seeded(config, view, rand::random())
    }

    /// A fresh round whose layout is fully determined by `seed`.
    pub fn seeded(config: GameConfig, view: V, seed: u64) -> Self {
        Self {
            board: Board::new(config.size),
            view,
            store: None,
            rng: SmallRng::seed_from_u64(seed),
            mines: None,
            flags_used: 0,
            attempts: 0,
            neutral_remaining: config.neutral_tiles(),
            timer: RoundTimer::new(config.time_limit),
            started: false,
            ended: false,
            outcome: None,
            config,
        }
    }

    /// Attaches the persistence directory. Until mines are placed the layout
    /// snapshot holds a placeholder line.
    pub fn with_store(mut self, store: RoundStore) -> Self {
        if let Err(err) = store.write_layout(self.mines.as_deref()) {
            self.persist_warning("mine layout", &err);
        }
        self.store = Some(store);
        self
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    pub const fn flags_used(&self) -> TileCount {
        self.flags_used
    }

    /// Unrevealed neutral tiles; the round is won when this reaches zero.
    pub const fn neutral_remaining(&self) -> TileCount {
        self.neutral_remaining
    }

    pub const fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    pub const fn is_started(&self) -> bool {
        self.started
    }

    pub const fn is_ended(&self) -> bool {
        self.ended
    }

    pub const fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn kind_at(&self, pos: GridPos) -> TileKind {
        self.board.tile(pos).kind()
    }

    pub fn state_at(&self, pos: GridPos) -> TileState {
        self.board.tile(pos).state()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Starts the countdown (idempotent). A finished round stays stopped.
    pub fn start_timer(&mut self) {
        if !self.ended {
            self.timer.start();
        }
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    /// Delivers one second of countdown; the embedder calls this once per
    /// second while the round is on screen. A tick may arrive after the
    /// round ended, so that is checked before anything happens.
    pub fn tick(&mut self) {
        if self.ended {
            return;
        }
        match self.timer.tick() {
            TimerTick::Idle => {}
            TimerTick::Running(remaining) => self.view.time_changed(remaining),
            TimerTick::Expired => {
                self.view.time_changed(0);
                self.end_round(false);
            }
        }
    }

    /// Gives the round up: the mines are shown and the loss is recorded.
    pub fn resign(&mut self) {
        self.end_round(false);
    }

    /// Feeds one `(position, button)` action from the UI into the round.
    ///
    /// Everything an unconstrained UI can produce on a live board is legal:
    /// actions that mean nothing (clicking a revealed tile, revealing a
    /// flagged one, flagging with no flags left, anything after the round
    /// ended) are silent no-ops. Only coordinates off the board are an
    /// error.
    pub fn handle(&mut self, pos: GridPos, button: Button) -> Result<()> {
        let pos = self.board.validate(pos)?;
        if self.ended || self.board.tile(pos).state().is_revealed() {
            return Ok(());
        }

        match button {
            Button::Primary => {
                if matches!(self.board.tile(pos).state(), TileState::Flagged) {
                    return Ok(());
                }

                // the first reveal must land on a neutral tile clear of
                // mines; if the board cannot promise that yet, building the
                // layout around the click makes it true
                if !self.started
                    && (!matches!(self.board.tile(pos).kind(), TileKind::Neutral)
                        || self.board.adjacent_mines(pos) != 0)
                {
                    self.place_mines(pos);
                }

                self.started = true;
                self.attempts += 1;
                self.view.attempts_changed(self.attempts);
                self.flood(pos);

                if self.board.tile(pos).kind().is_mine() {
                    self.end_round(false);
                    return Ok(());
                }
            }
            Button::Secondary => {
                self.toggle_flag(pos);
                if self.hyper_reward_armed(pos) {
                    self.started = true;
                    self.reveal_cross(pos);
                }
            }
        }

        if self.neutral_remaining == 0 {
            self.end_round(true);
        }
        Ok(())
    }

    /// Deferred layout creation, anchored on the first revealed tile. Once
    /// the round has started the existing layout stays as it is.
    fn place_mines(&mut self, anchor: GridPos) {
        if self.started || self.mines.is_some() {
            return;
        }

        let spots = scatter(&self.board, &self.config, anchor, &mut self.rng);
        for pos in self.board.positions() {
            self.board.tile_mut(pos).kind = TileKind::Neutral;
        }
        for spot in &spots {
            self.board.tile_mut(spot.pos).kind = if spot.hyper {
                TileKind::HyperMine
            } else {
                TileKind::Mine
            };
        }
        log::debug!(
            "placed {} mines ({} hyper) clear of anchor {:?}",
            spots.len(),
            self.config.hyper_mines,
            anchor
        );

        let result = self.store.as_ref().map(|s| s.write_layout(Some(&spots)));
        if let Some(Err(err)) = result {
            self.persist_warning("mine layout", &err);
        }
        self.mines = Some(spots);
    }

    /// Zero-expansion flood fill: reveals `start`, then keeps expanding
    /// through neutral tiles with no adjacent mines, exposing their numbered
    /// boundary. The `swept` marker keeps the walk off tiles it already
    /// touched; the grid graph is full of cycles.
    fn flood(&mut self, start: GridPos) {
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            let tile = self.board.tile_mut(pos);
            if tile.swept {
                continue;
            }
            tile.swept = true;

            self.reveal_tile(pos, true);
            if !matches!(self.board.tile(pos).kind(), TileKind::Neutral) {
                continue;
            }
            if self.board.adjacent_mines(pos) == 0 {
                queue.extend(
                    self.board
                        .neighbors(pos)
                        .filter(|&p| !self.board.tile(p).swept),
                );
            }
        }
    }

    /// Reveals one tile and reports it to the view. `tripped` marks mine
    /// reveals that lose the round; end-of-round and hyper-reward reveals
    /// pass `false`. Revealing is terminal for the tile.
    fn reveal_tile(&mut self, pos: GridPos, tripped: bool) {
        let tile = *self.board.tile(pos);
        if tile.state().is_revealed() {
            return;
        }

        match tile.kind() {
            TileKind::Unassigned => return,
            TileKind::Neutral => {
                // a flag standing on a revealed neutral tile is handed back
                if matches!(tile.state(), TileState::Flagged) {
                    self.flags_used -= 1;
                    self.view.flags_changed(self.flags_used, self.config.mines);
                }
                self.neutral_remaining -= 1;
                let count = self.board.adjacent_mines(pos);
                self.view.tile_changed(pos, TileView::Neutral(count));
            }
            TileKind::Mine | TileKind::HyperMine => {
                // revealing a still-hidden mine uses up a flag slot
                if matches!(tile.state(), TileState::Hidden) {
                    self.flags_used += 1;
                    self.view.flags_changed(self.flags_used, self.config.mines);
                }
                let view = match tile.kind() {
                    TileKind::HyperMine => TileView::HyperMine { tripped },
                    _ => TileView::Mine { tripped },
                };
                self.view.tile_changed(pos, view);
            }
        }
        self.board.tile_mut(pos).state = TileState::Revealed;
    }

    /// Hidden ⇄ Flagged, capped by the flag supply. Revealed tiles ignore
    /// the toggle.
    fn toggle_flag(&mut self, pos: GridPos) {
        match self.board.tile(pos).state() {
            TileState::Hidden if self.flags_used < self.config.mines => {
                self.board.tile_mut(pos).state = TileState::Flagged;
                self.flags_used += 1;
                self.view.flags_changed(self.flags_used, self.config.mines);
                self.view.tile_changed(pos, TileView::Flagged);
            }
            TileState::Flagged => {
                self.board.tile_mut(pos).state = TileState::Hidden;
                self.flags_used -= 1;
                self.view.flags_changed(self.flags_used, self.config.mines);
                self.view.tile_changed(pos, TileView::Hidden);
            }
            TileState::Hidden | TileState::Revealed => {}
        }
    }

    fn hyper_reward_armed(&self, pos: GridPos) -> bool {
        let tile = self.board.tile(pos);
        matches!(tile.kind(), TileKind::HyperMine)
            && matches!(tile.state(), TileState::Flagged)
            && self.attempts <= HYPER_FLAG_ATTEMPT_LIMIT
    }

    /// The hyper-mine reward: the flagged hyper mine's column and row open
    /// up as if they were safe. This path never loses the round.
    fn reveal_cross(&mut self, (x, y): GridPos) {
        log::debug!("hyper-mine reward fired at {:?}", (x, y));
        for i in 0..self.board.size() {
            self.reveal_tile((x, i), false);
            self.reveal_tile((i, y), false);
        }
    }

    /// Ends the round at most once: stops the clock, shows every mine and
    /// records the result.
    fn end_round(&mut self, won: bool) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.timer.stop();

        let spots = self.mines.clone().unwrap_or_default();
        for spot in spots {
            self.reveal_tile(spot.pos, !won);
        }

        let outcome = if won {
            RoundOutcome::Won
        } else {
            RoundOutcome::Lost
        };
        self.outcome = Some(outcome);

        let record = RoundRecord {
            total_mines: self.config.mines,
            attempts: self.attempts,
            elapsed_secs: self.config.time_limit.saturating_sub(self.timer.remaining()),
            winner: outcome.winner(),
        };
        let result = self.store.as_ref().map(|s| s.record_round(&record));
        if let Some(Err(err)) = result {
            self.persist_warning("round history", &err);
        }

        self.view.round_ended(outcome);
    }

    fn persist_warning(&mut self, what: &str, err: &io::Error) {
        log::warn!("could not write {what}: {err}");
        self.view.warning(&format!("could not write {what}"));
    }
}
