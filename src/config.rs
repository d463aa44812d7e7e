use std::fmt;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{mult, Axis, TileCount};
use crate::{DescriptionError, GameError};

/// Up to 9 tiles around the first click stay mine-free, so a board must have
/// at least that many non-mine tiles.
const SAFE_ZONE_TILES: TileCount = 9;

/// The four fields of a game description, in file order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptionField {
    Difficulty,
    Mines,
    Time,
    HyperMines,
}

const DESCRIPTION_FIELDS: [DescriptionField; 4] = [
    DescriptionField::Difficulty,
    DescriptionField::Mines,
    DescriptionField::Time,
    DescriptionField::HyperMines,
];

impl fmt::Display for DescriptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Difficulty => "difficulty",
            Self::Mines => "mines",
            Self::Time => "time",
            Self::HyperMines => "hyper mines",
        })
    }
}

/// Bounds a difficulty tier puts on the description values.
struct TierRules {
    size: Axis,
    mines: RangeInclusive<i64>,
    time: RangeInclusive<i64>,
    hyper_mines: RangeInclusive<i64>,
}

/// Tier 1 is the beginner board, tier 2 the only one that may carry a hyper
/// mine.
static TIER_RULES: [TierRules; 2] = [
    TierRules {
        size: 9,
        mines: 9..=11,
        time: 120..=180,
        hyper_mines: 0..=0,
    },
    TierRules {
        size: 16,
        mines: 35..=45,
        time: 240..=360,
        hyper_mines: 0..=1,
    },
];

/// Canonical, bounds-checked parameters of one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Axis,
    pub mines: TileCount,
    /// Countdown start, in seconds.
    pub time_limit: u32,
    pub hyper_mines: TileCount,
}

impl GameConfig {
    pub fn new(
        size: Axis,
        mines: TileCount,
        time_limit: u32,
        hyper_mines: TileCount,
    ) -> Result<Self, GameError> {
        if mines > mult(size, size).saturating_sub(SAFE_ZONE_TILES) {
            return Err(GameError::TooManyMines);
        }
        if hyper_mines > mines {
            return Err(GameError::TooManyHyperMines);
        }
        Ok(Self {
            size,
            mines,
            time_limit,
            hyper_mines,
        })
    }

    pub const fn total_tiles(&self) -> TileCount {
        mult(self.size, self.size)
    }

    /// Tiles that must all be revealed to win.
    pub const fn neutral_tiles(&self) -> TileCount {
        self.total_tiles() - self.mines
    }

    /// Validates a 4-line description, order `difficulty, mines, time,
    /// hyper mines`, each an integer.
    ///
    /// The difficulty selects the tier every other field is checked against,
    /// so it fails on its own; the remaining fields are checked together and
    /// reported together.
    pub fn parse(text: &str) -> Result<Self, DescriptionError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() > DESCRIPTION_FIELDS.len() {
            return Err(DescriptionError::TooManyLines);
        }
        if lines.len() < DESCRIPTION_FIELDS.len() {
            return Err(DescriptionError::MissingFields(
                DESCRIPTION_FIELDS[lines.len()..].to_vec(),
            ));
        }

        let tier = parse_int(lines[0])
            .and_then(|difficulty| difficulty.checked_sub(1))
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| TIER_RULES.get(index))
            .ok_or_else(|| DescriptionError::InvalidValue(vec![DescriptionField::Difficulty]))?;

        let mut invalid = Vec::new();
        let mines = check_field(lines[1], &tier.mines, DescriptionField::Mines, &mut invalid);
        let time = check_field(lines[2], &tier.time, DescriptionField::Time, &mut invalid);
        let hyper_mines = check_field(
            lines[3],
            &tier.hyper_mines,
            DescriptionField::HyperMines,
            &mut invalid,
        );
        if !invalid.is_empty() {
            return Err(DescriptionError::InvalidValue(invalid));
        }

        // the tier table keeps every combination inside the mine-capacity
        // invariant, so no further checking here
        Ok(Self {
            size: tier.size,
            mines: mines as TileCount,
            time_limit: time as u32,
            hyper_mines: hyper_mines as TileCount,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptionError> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

fn parse_int(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}

fn check_field(
    line: &str,
    range: &RangeInclusive<i64>,
    field: DescriptionField,
    invalid: &mut Vec<DescriptionField>,
) -> i64 {
    match parse_int(line) {
        Some(value) if range.contains(&value) => value,
        _ => {
            invalid.push(field);
            0
        }
    }
}
