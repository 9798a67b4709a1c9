//! Tug of War.
//!
//! Each player gets one timed turn of the bar/target simulation in
//! [`simulation`]. The turn starts on the first tap, lasts `DURATION`, and
//! ends early on an explicit stop. Nobody is eliminated during a turn;
//! after the round only the players tied for the highest floored strength
//! stay alive.

pub mod simulation;

pub use simulation::{TapStep, TugSimulation, TugView};

use std::time::Duration;

use tracing::{debug, info};

use super::outcome::{EliminationCause, StepRecord, TurnOutcome, TurnStatus};
use super::{GameKind, TurnContext};
use crate::core::{InputError, Player, PlayerId, Roster, TugConfig, TugSignal};

pub const TRACK_W: f64 = 1000.0;
pub const TARGET_W: f64 = 100.0;
pub const BAR_MIN: f64 = 6.0;
pub const BAR_MAX_RATIO: f64 = 0.85;
pub const BAR_MAX: f64 = TRACK_W * BAR_MAX_RATIO;
pub const SHRINK_SPEED: f64 = 210.0;
pub const BASE_INC: f64 = 30.0;
pub const MAX_BONUS: f64 = 5.0;
pub const BONUS_SCALE: f64 = 0.5;
pub const MIN_TAP_GAP: f64 = 0.04;
pub const MAX_DT: f64 = 0.2;
pub const STRENGTH_RATE: f64 = 28.0;
pub const MIN_V: f64 = 80.0;
pub const MAX_V: f64 = 340.0;
pub const MAX_ACCEL: f64 = 600.0;
pub const ACCEL_INTERVAL: (f64, f64) = (0.18, 0.78);
pub const EDGE_MARGIN: f64 = 2.0;
pub const TARGET_START_X: f64 = 18.0;
pub const DURATION: Duration = Duration::from_secs(10);

const GAME: GameKind = GameKind::TugOfWar;

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnEnd {
    TimeUp,
    Stopped,
}

#[derive(Clone, Debug, Default)]
pub struct TugOfWar {
    config: TugConfig,
}

impl TugOfWar {
    pub fn new(config: TugConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &TugConfig {
        &self.config
    }

    /// Play one turn. Resets `tug_strength` to zero first.
    ///
    /// The turn always survives; elimination happens in
    /// [`reduce_to_strongest`].
    pub fn play(&self, player: &mut Player, ctx: &mut TurnContext<'_>) -> Result<TurnOutcome, InputError> {
        if !player.is_alive() {
            return Ok(TurnOutcome::skipped(player, GAME));
        }

        let mut outcome = TurnOutcome::begin(player, GAME);
        player.tug_strength = 0.0;
        let mut sim = TugSimulation::new(&self.config, ctx.rng);

        let end = loop {
            let view = sim.view();
            let at = match ctx.input.tug_signal(player, &view)? {
                TugSignal::Stop => break TurnEnd::Stopped,
                TugSignal::Tap { at } => at,
            };
            if sim.is_expired(at) {
                break TurnEnd::TimeUp;
            }

            let step = sim.tap(at, ctx.rng);
            player.tug_strength = sim.strength();
            debug!(
                player = %player.name(),
                tap = sim.taps(),
                tip = step.tip,
                window = ?(step.window_start, step.window_end),
                aligned = step.aligned,
                strength = step.strength,
                "tug of war: tap"
            );

            ctx.record(
                &mut outcome,
                StepRecord::Tug {
                    tap: sim.taps(),
                    dt: step.dt,
                    tip: step.tip,
                    window_start: step.window_start,
                    window_end: step.window_end,
                    aligned: step.aligned,
                    gain: step.gain,
                    strength: step.strength,
                },
            );
        };

        let floored = player.floored_strength();
        info!(player = %player.name(), taps = sim.taps(), strength = floored, ?end, "tug of war: turn over");
        let message = match end {
            TurnEnd::TimeUp => format!("Time! Tug complete (strength={floored})"),
            TurnEnd::Stopped => format!("Stopped. Tug complete (strength={floored})"),
        };
        Ok(outcome.finish(TurnStatus::Survived, message))
    }
}

/// Eliminate every alive player below the highest floored strength.
///
/// Ties at the top survive together. Returns the eliminated players in
/// roster order; does nothing when no one is alive.
pub fn reduce_to_strongest(roster: &mut Roster) -> Vec<PlayerId> {
    let Some(best) = roster.alive().map(Player::floored_strength).max() else {
        return Vec::new();
    };

    let mut eliminated = Vec::new();
    for player in roster.iter_mut() {
        if player.is_alive() && player.floored_strength() < best {
            player.eliminate(GAME, EliminationCause::Outpulled);
            eliminated.push(player.id());
        }
    }

    info!(best, eliminated = eliminated.len(), "tug of war: survivors reduced");
    eliminated
}
