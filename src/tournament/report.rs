//! Round summaries and the final standings.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Roster};
use crate::games::{EliminationCause, GameKind};

/// What one round did to the field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 0-based position of the round in the tournament.
    pub index: usize,
    pub game: GameKind,
    /// Alive players when the round opened.
    pub entered: usize,
    /// Turns actually played (alive players only).
    pub turns: usize,
    /// Eliminated during turns, in roster order.
    pub eliminated: Vec<PlayerId>,
    /// Eliminated by the post-round reduction.
    pub reduced: Vec<PlayerId>,
    /// Alive players when the round closed.
    pub survivors: usize,
}

/// One line of the final standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub survived: bool,
    /// Tug strength, floored.
    pub final_strength: i64,
    pub eliminated_in: Option<GameKind>,
    pub cause: Option<EliminationCause>,
}

/// Final standings for every player, in roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub entries: Vec<ReportEntry>,
}

impl FinalReport {
    pub fn from_roster(roster: &Roster) -> Self {
        let entries = roster
            .iter()
            .map(|p| ReportEntry {
                name: p.name().to_string(),
                survived: p.is_alive(),
                final_strength: p.floored_strength(),
                eliminated_in: p.elimination().map(|e| e.game),
                cause: p.elimination().map(|e| e.cause),
            })
            .collect();
        Self { entries }
    }

    pub fn survivors(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.survived)
    }

    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl std::fmt::Display for FinalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Final Results ===")?;
        for entry in &self.entries {
            let status = if entry.survived { "SURVIVED" } else { "ELIMINATED" };
            write!(f, "{} | {} | strength={}", entry.name, status, entry.final_strength)?;
            if let (Some(game), Some(cause)) = (entry.eliminated_in, entry.cause) {
                write!(f, " ({game}: {cause})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
