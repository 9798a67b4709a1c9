//! Glass Bridge.
//!
//! Each player crosses `TOTAL_STEPS` panels, picking left or right at each.
//! The first panel always holds. After that a chosen panel holds with
//! probability `P_SAFE`, except for the round's guaranteed player.
//!
//! When a round opens with at least `GUARANTEE_MIN_ALIVE` players alive,
//! one of them is drawn uniformly as the guaranteed player and crosses
//! every panel safely. This bounds attrition so a crowded round can never
//! wipe out the whole field.
//!
//! Panels carry no memory between players: a panel broken by one player
//! does not inform the next.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::outcome::{EliminationCause, StepRecord, TurnOutcome, TurnStatus};
use super::{GameKind, TurnContext};
use crate::core::{BridgeConfig, InputError, Player, PlayerId, RandomSource, Roster, Side};

pub const TOTAL_STEPS: u32 = 5;
pub const P_SAFE: f64 = 0.60;
pub const GUARANTEE_MIN_ALIVE: usize = 3;

const GAME: GameKind = GameKind::GlassBridge;

/// Round-scoped data, created by `start_round` and dropped by `end_round`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRound {
    pub alive_at_start: usize,
    pub guaranteed: Option<PlayerId>,
}

#[derive(Clone, Debug, Default)]
pub struct GlassBridge {
    config: BridgeConfig,
    round: Option<BridgeRound>,
}

impl GlassBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config, round: None }
    }

    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The current round's setup, if a round is open.
    #[must_use]
    pub fn round(&self) -> Option<BridgeRound> {
        self.round
    }

    /// The guaranteed player of the open round.
    #[must_use]
    pub fn guaranteed(&self) -> Option<PlayerId> {
        self.round.and_then(|r| r.guaranteed)
    }

    /// Open a round, drawing the guaranteed player if enough are alive.
    pub fn start_round(&mut self, roster: &Roster, rng: &mut dyn RandomSource) {
        let alive: Vec<PlayerId> = roster.alive().map(Player::id).collect();

        let guaranteed = if alive.len() >= self.config.guarantee_min_alive.max(1) {
            alive.get(rng.gen_index(alive.len())).copied()
        } else {
            None
        };

        info!(alive = alive.len(), ?guaranteed, "glass bridge: round opened");
        self.round = Some(BridgeRound {
            alive_at_start: alive.len(),
            guaranteed,
        });
    }

    pub fn end_round(&mut self) {
        self.round = None;
    }

    /// Play one turn. Resets `bridge_step` before the first panel.
    ///
    /// Invalid choices are re-requested until the input yields `left` or
    /// `right`.
    pub fn play(&self, player: &mut Player, ctx: &mut TurnContext<'_>) -> Result<TurnOutcome, InputError> {
        if !player.is_alive() {
            return Ok(TurnOutcome::skipped(player, GAME));
        }

        let total = self.config.total_steps;
        let guaranteed = self.guaranteed() == Some(player.id());
        let mut outcome = TurnOutcome::begin(player, GAME);
        player.bridge_step = 0;

        while player.bridge_step < total {
            let step = player.bridge_step;
            let choice = request_side(player, step, ctx)?;

            let survived = step == 0 || guaranteed || ctx.rng.gen_bool(self.config.safe_probability);
            let correct = if survived { choice } else { choice.opposite() };
            let message = if survived {
                "Tempered glass! Safe step!".to_string()
            } else {
                format!("Glass broke! Correct was: {correct}")
            };
            debug!(player = %player.name(), step, %choice, survived, guaranteed, "glass bridge: panel");

            ctx.record(
                &mut outcome,
                StepRecord::Bridge {
                    step,
                    choice,
                    correct,
                    guaranteed,
                    survived,
                    message: message.clone(),
                },
            );

            if !survived {
                player.eliminate(GAME, EliminationCause::GlassBroke);
                info!(player = %player.name(), step, "glass bridge: fell");
                return Ok(outcome.finish(TurnStatus::Eliminated(EliminationCause::GlassBroke), message));
            }
            player.bridge_step += 1;
        }

        info!(player = %player.name(), guaranteed, "glass bridge: crossed");
        Ok(outcome.finish(TurnStatus::Survived, "Crossed the bridge!"))
    }
}

fn request_side(player: &Player, step: u32, ctx: &mut TurnContext<'_>) -> Result<Side, InputError> {
    loop {
        let token = ctx.input.bridge_choice(player, step)?;
        match token.parse::<Side>() {
            Ok(side) => return Ok(side),
            Err(err) => warn!(player = %player.name(), step, %err, "glass bridge: asking again"),
        }
    }
}
