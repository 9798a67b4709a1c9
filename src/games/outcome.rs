//! Structured turn results handed to the report collaborator.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::red_light::Light;
use super::GameKind;
use crate::core::{Movement, Player, PlayerId, Side};

/// Why a player was eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Moved while the light was red.
    RedLightViolation,
    /// Ran out of the Red-Light-Green-Light time budget.
    Timeout,
    /// Stepped on a panel that broke.
    GlassBroke,
    /// Finished Tug-of-War below the top strength.
    Outpulled,
}

impl std::fmt::Display for EliminationCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EliminationCause::RedLightViolation => "red-light violation",
            EliminationCause::Timeout => "timeout",
            EliminationCause::GlassBroke => "glass broke",
            EliminationCause::Outpulled => "outpulled",
        };
        write!(f, "{}", label)
    }
}

/// Terminal state of one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    /// The player was already out; nothing happened.
    Skipped,
    Survived,
    Eliminated(EliminationCause),
}

/// One attempt, panel or tap inside a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StepRecord {
    RedLight {
        /// 1-based attempt number.
        attempt: u32,
        light: Light,
        movement: Movement,
        /// Forward advances after this attempt.
        position: u32,
        survived: bool,
        message: String,
    },
    Bridge {
        /// 0-based panel index.
        step: u32,
        choice: Side,
        correct: Side,
        guaranteed: bool,
        survived: bool,
        message: String,
    },
    Tug {
        /// 1-based tap number.
        tap: u32,
        /// Simulated seconds covered by this tap.
        dt: f64,
        tip: f64,
        window_start: f64,
        window_end: f64,
        aligned: bool,
        /// Strength earned by this tap.
        gain: f64,
        /// Running strength after this tap.
        strength: f64,
    },
}

impl StepRecord {
    /// Whether the player is still standing after this step.
    #[must_use]
    pub fn survived(&self) -> bool {
        match self {
            StepRecord::RedLight { survived, .. } | StepRecord::Bridge { survived, .. } => *survived,
            StepRecord::Tug { .. } => true,
        }
    }
}

/// Result of one `play` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub player: PlayerId,
    pub name: String,
    pub game: GameKind,
    pub status: TurnStatus,
    pub message: String,
    pub steps: SmallVec<[StepRecord; 8]>,
}

impl TurnOutcome {
    pub(crate) fn begin(player: &Player, game: GameKind) -> Self {
        Self {
            player: player.id(),
            name: player.name().to_string(),
            game,
            status: TurnStatus::Survived,
            message: String::new(),
            steps: SmallVec::new(),
        }
    }

    /// Outcome for a call on an eliminated player.
    pub(crate) fn skipped(player: &Player, game: GameKind) -> Self {
        Self {
            status: TurnStatus::Skipped,
            message: "already eliminated".to_string(),
            ..Self::begin(player, game)
        }
    }

    pub(crate) fn finish(mut self, status: TurnStatus, message: impl Into<String>) -> Self {
        self.status = status;
        self.message = message.into();
        self
    }

    /// `true` unless the turn eliminated the player or the player was out.
    #[must_use]
    pub fn survived(&self) -> bool {
        self.status == TurnStatus::Survived
    }

    #[must_use]
    pub fn eliminated(&self) -> Option<EliminationCause> {
        match self.status {
            TurnStatus::Eliminated(cause) => Some(cause),
            _ => None,
        }
    }

    /// The last recorded step, if any.
    #[must_use]
    pub fn last_step(&self) -> Option<&StepRecord> {
        self.steps.last()
    }
}
