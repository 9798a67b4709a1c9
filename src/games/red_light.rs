//! Red Light, Green Light.
//!
//! The player repeatedly sees a light and chooses to move or stay. Moving
//! on green advances, moving on red is fatal, staying is always safe. The
//! player must bank `REQUIRED_SUCCESSES` advances before the time budget
//! runs out. The budget is checked before every light is drawn.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::outcome::{EliminationCause, StepRecord, TurnOutcome, TurnStatus};
use super::{GameKind, TurnContext};
use crate::core::{InputError, Movement, Player, RedLightConfig};

pub const REQUIRED_SUCCESSES: u32 = 4;
pub const TIME_LIMIT: Duration = Duration::from_secs(20);
pub const GREEN_PROBABILITY: f64 = 0.5;

const GAME: GameKind = GameKind::RedLightGreenLight;

/// The doll's light.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Light {
    Red,
    Green,
}

impl std::fmt::Display for Light {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Light::Red => write!(f, "RED"),
            Light::Green => write!(f, "GREEN"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RedLightGreenLight {
    config: RedLightConfig,
}

impl RedLightGreenLight {
    pub fn new(config: RedLightConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RedLightConfig {
        &self.config
    }

    /// Play one turn. Resets `rlg_progress` before the first attempt.
    ///
    /// Unrecognized tokens count as `stay`.
    pub fn play(&self, player: &mut Player, ctx: &mut TurnContext<'_>) -> Result<TurnOutcome, InputError> {
        if !player.is_alive() {
            return Ok(TurnOutcome::skipped(player, GAME));
        }

        let required = self.config.required_successes;
        let mut outcome = TurnOutcome::begin(player, GAME);
        player.rlg_progress = 0;

        let started = ctx.clock.now();
        let mut attempt = 0;

        while player.rlg_progress < required {
            let elapsed = ctx.clock.now().saturating_sub(started);
            if elapsed >= self.config.time_limit {
                player.eliminate(GAME, EliminationCause::Timeout);
                info!(player = %player.name(), ?elapsed, progress = player.rlg_progress, "red light: timeout");
                return Ok(outcome.finish(
                    TurnStatus::Eliminated(EliminationCause::Timeout),
                    "TIMEOUT! Too slow to reach the line.",
                ));
            }

            attempt += 1;
            let light = if ctx.rng.gen_bool(self.config.green_probability) {
                Light::Green
            } else {
                Light::Red
            };

            let token = ctx.input.red_light_action(player, light)?;
            let movement = Movement::from_token_or_stay(&token);
            debug!(player = %player.name(), attempt, %light, ?movement, token = %token, "red light: attempt");

            let (survived, message) = match (movement, light) {
                (Movement::Move, Light::Red) => {
                    player.eliminate(GAME, EliminationCause::RedLightViolation);
                    (false, "BANG! Moved during RED light! Shot by the doll!")
                }
                (Movement::Move, Light::Green) => {
                    player.rlg_progress += 1;
                    (true, "Ran forward safely!")
                }
                (Movement::Stay, Light::Green) => (true, "Stayed still during GREEN light. No progress."),
                (Movement::Stay, Light::Red) => (true, "Stayed frozen during RED light. Safe!"),
            };

            ctx.record(
                &mut outcome,
                StepRecord::RedLight {
                    attempt,
                    light,
                    movement,
                    position: player.rlg_progress,
                    survived,
                    message: message.to_string(),
                },
            );

            if !survived {
                info!(player = %player.name(), attempt, "red light: moved on red");
                return Ok(outcome.finish(
                    TurnStatus::Eliminated(EliminationCause::RedLightViolation),
                    message,
                ));
            }
        }

        info!(player = %player.name(), attempts = attempt, "red light: complete");
        Ok(outcome.finish(
            TurnStatus::Survived,
            format!("Reached the line with {required}/{required} moves."),
        ))
    }
}
