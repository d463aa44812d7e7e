use std::io;

use thiserror::Error;

use crate::DescriptionField;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the board")]
    OutOfBounds,
    #[error("mine count must leave room for a safe first click")]
    TooManyMines,
    #[error("hyper mine count exceeds the mine count")]
    TooManyHyperMines,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Errors raised while loading or validating a game description. The two
/// value variants name every offending field of the description at once.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("game description ends early, missing: {}", join_fields(.0))]
    MissingFields(Vec<DescriptionField>),
    #[error(
        "game description has too many lines, expected one line for each of \
         difficulty, mines, time and hyper mines"
    )]
    TooManyLines,
    #[error("not in the valid range: {}", join_fields(.0))]
    InvalidValue(Vec<DescriptionField>),
    #[error("could not read game description")]
    Io(#[from] io::Error),
}

fn join_fields(fields: &[DescriptionField]) -> String {
    let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
    names.join(", ")
}
