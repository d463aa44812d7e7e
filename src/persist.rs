use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::TileCount;
use crate::placer::MineSpot;

const LAYOUT_FILE: &str = "mines.txt";
const HISTORY_FILE: &str = "rounds.txt";

/// The history log keeps this many most recent rounds.
const HISTORY_LIMIT: usize = 5;

const LAYOUT_PLACEHOLDER: &str =
    "Mine locations are written here once the first reveal of the round places them.";

/// Who took the round: the player by clearing the board, the computer by a
/// tripped mine or an expired clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Computer,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Player => "player",
            Self::Computer => "computer",
        })
    }
}

impl FromStr for Winner {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> std::result::Result<Self, ParseRecordError> {
        match s {
            "player" => Ok(Self::Player),
            "computer" => Ok(Self::Computer),
            _ => Err(ParseRecordError),
        }
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("malformed round record")]
pub struct ParseRecordError;

/// Result of one completed round, one space-separated line in the history
/// log.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub total_mines: TileCount,
    pub attempts: u32,
    pub elapsed_secs: u32,
    pub winner: Winner,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.total_mines, self.attempts, self.elapsed_secs, self.winner
        )
    }
}

impl FromStr for RoundRecord {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> std::result::Result<Self, ParseRecordError> {
        let mut tokens = line.split_whitespace();
        let record = Self {
            total_mines: token(&mut tokens)?,
            attempts: token(&mut tokens)?,
            elapsed_secs: token(&mut tokens)?,
            winner: token(&mut tokens)?,
        };
        if tokens.next().is_some() {
            return Err(ParseRecordError);
        }
        Ok(record)
    }
}

fn token<T: FromStr>(
    tokens: &mut std::str::SplitWhitespace<'_>,
) -> std::result::Result<T, ParseRecordError> {
    tokens
        .next()
        .ok_or(ParseRecordError)?
        .parse()
        .map_err(|_| ParseRecordError)
}

/// Writes the two plain-text artifacts of a round into one directory. All
/// failures stay `io::Result`s for the engine to downgrade to warnings;
/// nothing here touches game state.
#[derive(Clone, Debug)]
pub struct RoundStore {
    dir: PathBuf,
}

impl RoundStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn layout_path(&self) -> PathBuf {
        self.dir.join(LAYOUT_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Overwrites the layout snapshot: one `row, column, 0|1` line per mine,
    /// hyper mines first. `None` stands in before placement has happened.
    pub fn write_layout(&self, spots: Option<&[MineSpot]>) -> io::Result<()> {
        let mut out = String::new();
        match spots {
            Some(spots) => {
                for spot in spots {
                    let (column, row) = spot.pos;
                    out.push_str(&format!("{}, {}, {}\n", row, column, u8::from(spot.hyper)));
                }
            }
            None => {
                out.push_str(LAYOUT_PLACEHOLDER);
                out.push('\n');
            }
        }
        fs::write(self.layout_path(), out)
    }

    /// Prepends `record` to the log and truncates it to the most recent
    /// five rounds. Prior lines are carried over as they were written; a
    /// missing or unreadable prior log counts as empty.
    pub fn record_round(&self, record: &RoundRecord) -> io::Result<()> {
        let prior = fs::read_to_string(self.history_path()).unwrap_or_default();

        let mut lines = vec![record.to_string()];
        lines.extend(prior.lines().map(str::to_owned));
        lines.truncate(HISTORY_LIMIT);

        let mut out = lines.join("\n");
        out.push('\n');
        fs::write(self.history_path(), out)
    }

    /// Reads the log back, most recent first. Lines that do not parse are
    /// skipped rather than failing the whole read.
    pub fn history(&self) -> io::Result<Vec<RoundRecord>> {
        let text = match fs::read_to_string(self.history_path()) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        Ok(text.lines().filter_map(|line| line.parse().ok()).collect())
    }
}
