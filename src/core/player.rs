//! Players and the roster.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players, equal to the
//! player's position in the roster.
//!
//! ## Roster
//!
//! Ordered player storage backed by `Vec` for O(1) access. Insertion order
//! is iteration order for every round, and the roster never grows or
//! shrinks during a run.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::RosterError;
use crate::games::{EliminationCause, GameKind};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a roster of `player_count` players.
    ///
    /// ```
    /// use survival_tournament::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(255) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Where and why a player left the tournament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub game: GameKind,
    pub cause: EliminationCause,
}

/// One contestant and their per-game scratch state.
///
/// `alive` is private: the only transition is `eliminate`, and there is
/// no way back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    alive: bool,
    elimination: Option<Elimination>,

    /// Successful forward advances in Red-Light-Green-Light.
    pub rlg_progress: u32,

    /// Next Glass-Bridge panel to cross (0-based).
    pub bridge_step: u32,

    /// Strength accumulated in Tug-of-War. Kept for the final report.
    pub tug_strength: f64,
}

impl Player {
    /// Create a living player with zeroed scratch state.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alive: true,
            elimination: None,
            rlg_progress: 0,
            bridge_step: 0,
            tug_strength: 0.0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Where the player was eliminated, if they were.
    #[must_use]
    pub fn elimination(&self) -> Option<Elimination> {
        self.elimination
    }

    /// Tug strength floored to an integer, the value rounds compare on.
    #[must_use]
    pub fn floored_strength(&self) -> i64 {
        self.tug_strength.floor() as i64
    }

    /// Eliminate the player.
    ///
    /// Returns `false` (and records nothing) if the player was already out,
    /// so the first cause always wins.
    pub fn eliminate(&mut self, game: GameKind, cause: EliminationCause) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.elimination = Some(Elimination { game, cause });
        true
    }
}

/// Ordered collection of players.
///
/// ## Example
///
/// ```
/// use survival_tournament::core::{PlayerId, Roster};
///
/// let roster = Roster::new(["Ali", "Sae-byeok", "Gi-hun"]).unwrap();
/// assert_eq!(roster.len(), 3);
/// assert_eq!(roster[PlayerId::new(1)].name(), "Sae-byeok");
/// assert_eq!(roster.alive_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from names in insertion order.
    ///
    /// Names are trimmed and must be non-blank and unique.
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = FxHashSet::default();
        let mut players = Vec::new();

        for (position, name) in names.into_iter().enumerate() {
            let name: String = name.into().trim().to_string();
            if name.is_empty() {
                return Err(RosterError::BlankName { position });
            }
            if !seen.insert(name.clone()) {
                return Err(RosterError::DuplicateName(name));
            }
            if position >= 255 {
                return Err(RosterError::TooManyPlayers(position + 1));
            }
            players.push(Player::new(PlayerId(position as u8), name));
        }

        if players.is_empty() {
            return Err(RosterError::Empty);
        }

        Ok(Self { players })
    }

    /// Roster of `count` players named "Player 1" through "Player N".
    pub fn numbered(count: usize) -> Result<Self, RosterError> {
        Self::new((1..=count).map(|i| format!("Player {i}")))
    }

    /// Get the number of players, alive or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always `false` for a constructed roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// Look a player up by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Iterate over all players in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Iterate over living players in roster order.
    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    /// Number of living players.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }
}

impl Index<PlayerId> for Roster {
    type Output = Player;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.players[player.index()]
    }
}

impl IndexMut<PlayerId> for Roster {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.players[player.index()]
    }
}
