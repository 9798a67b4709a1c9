//! The three minigames and their shared plumbing.
//!
//! Each game exposes the same shape:
//! - `start_round(roster, rng)`: round-scoped setup, sees the whole roster
//! - `play(player, ctx)`: one turn, mutating the player's scratch state
//! - `end_round()`: drops round-scoped state
//!
//! `Minigame` is the closed set the orchestrator drives. A turn on an
//! eliminated player is always a no-op that returns `TurnStatus::Skipped`.

pub mod outcome;
pub mod red_light;
pub mod glass_bridge;
pub mod tug_of_war;

pub use outcome::{EliminationCause, StepRecord, TurnOutcome, TurnStatus};
pub use red_light::{Light, RedLightGreenLight};
pub use glass_bridge::GlassBridge;
pub use tug_of_war::{TugOfWar, TugSimulation, TugView};

use serde::{Deserialize, Serialize};

use crate::core::{Clock, InputError, Player, PlayerId, PlayerInput, RandomSource, Roster, TournamentConfig};
use crate::tournament::Observer;

/// Which minigame a round runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    RedLightGreenLight,
    GlassBridge,
    TugOfWar,
}

impl GameKind {
    /// All games in tournament order.
    pub const ORDER: [GameKind; 3] = [
        GameKind::RedLightGreenLight,
        GameKind::GlassBridge,
        GameKind::TugOfWar,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GameKind::RedLightGreenLight => "Red Light Green Light",
            GameKind::GlassBridge => "Glass Bridge",
            GameKind::TugOfWar => "Tug of War",
        }
    }

    /// Rule lines shown to players before the game's first round.
    #[must_use]
    pub fn rules(self) -> &'static [&'static str] {
        match self {
            GameKind::RedLightGreenLight => &[
                "Goal: complete 4 GREEN moves within time.",
                "Moving on RED eliminates you.",
            ],
            GameKind::GlassBridge => &[
                "Goal: make 5 safe choices across the bridge.",
                "First step is always safe; after that ~60% of chosen panels hold.",
            ],
            GameKind::TugOfWar => &[
                "Tap to extend; the bar shrinks when idle.",
                "Keep the tip inside the moving window to gain strength.",
                "Highest strength survives (ties survive).",
            ],
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Collaborators a turn needs, borrowed from the orchestrator.
pub struct TurnContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub input: &'a mut dyn PlayerInput,
    pub clock: &'a dyn Clock,
    pub observer: &'a mut dyn Observer,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        rng: &'a mut dyn RandomSource,
        input: &'a mut dyn PlayerInput,
        clock: &'a dyn Clock,
        observer: &'a mut dyn Observer,
    ) -> Self {
        Self {
            rng,
            input,
            clock,
            observer,
        }
    }

    /// Stream a step to the observer and keep it on the outcome.
    pub(crate) fn record(&mut self, outcome: &mut TurnOutcome, step: StepRecord) {
        self.observer.on_step(outcome.player, &step);
        outcome.steps.push(step);
    }
}

/// A minigame instance.
#[derive(Clone, Debug)]
pub enum Minigame {
    RedLight(RedLightGreenLight),
    GlassBridge(GlassBridge),
    TugOfWar(TugOfWar),
}

impl Minigame {
    /// The fixed tournament order: Red-Light, Glass-Bridge, Tug-of-War.
    pub fn standard_lineup(config: &TournamentConfig) -> Vec<Minigame> {
        vec![
            Minigame::RedLight(RedLightGreenLight::new(config.red_light.clone())),
            Minigame::GlassBridge(GlassBridge::new(config.bridge.clone())),
            Minigame::TugOfWar(TugOfWar::new(config.tug.clone())),
        ]
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        match self {
            Minigame::RedLight(_) => GameKind::RedLightGreenLight,
            Minigame::GlassBridge(_) => GameKind::GlassBridge,
            Minigame::TugOfWar(_) => GameKind::TugOfWar,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.kind().title()
    }

    /// Round setup. Receives the full roster, eliminated players included.
    pub fn start_round(&mut self, roster: &Roster, rng: &mut dyn RandomSource) {
        match self {
            Minigame::GlassBridge(game) => game.start_round(roster, rng),
            Minigame::RedLight(_) | Minigame::TugOfWar(_) => {}
        }
    }

    /// Play one turn.
    ///
    /// Only a failing input collaborator produces an error.
    pub fn play(&mut self, player: &mut Player, ctx: &mut TurnContext<'_>) -> Result<TurnOutcome, InputError> {
        match self {
            Minigame::RedLight(game) => game.play(player, ctx),
            Minigame::GlassBridge(game) => game.play(player, ctx),
            Minigame::TugOfWar(game) => game.play(player, ctx),
        }
    }

    /// Survivor reduction after every turn has been played.
    ///
    /// Returns the players it eliminated.
    pub fn post_round(&mut self, roster: &mut Roster) -> Vec<PlayerId> {
        match self {
            Minigame::TugOfWar(_) => tug_of_war::reduce_to_strongest(roster),
            Minigame::RedLight(_) | Minigame::GlassBridge(_) => Vec::new(),
        }
    }

    /// Discard round-scoped state.
    pub fn end_round(&mut self) {
        if let Minigame::GlassBridge(game) = self {
            game.end_round();
        }
    }
}
