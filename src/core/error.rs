//! Error types.
//!
//! Game rules never fail: timeouts, bad tokens and dead players all resolve
//! inside the minigames. What remains are setup mistakes (an invalid roster)
//! and a broken input collaborator.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TournamentError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster must contain at least one player")]
    Empty,

    #[error("player name at position {position} is blank")]
    BlankName { position: usize },

    #[error("duplicate player name {0:?}")]
    DuplicateName(String),

    #[error("at most 255 players supported, got {0}")]
    TooManyPlayers(usize),
}

/// A raw token from the input collaborator that names no known choice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized {expected} token {token:?}")]
pub struct ParseChoiceError {
    pub expected: &'static str,
    pub token: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("input source closed")]
    Closed,

    #[error("input source failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("input collaborator failed during {game} turn of {player:?}")]
    Input {
        game: crate::games::GameKind,
        player: String,
        #[source]
        source: InputError,
    },
}
