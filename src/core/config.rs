//! Tournament configuration.
//!
//! Every field defaults to the constant the game is defined with; the
//! builders exist for harnesses that want shorter budgets or forced odds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::games::{glass_bridge, red_light, tug_of_war};

/// Red-Light-Green-Light parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedLightConfig {
    /// Forward advances needed to survive.
    pub required_successes: u32,

    /// Turn budget measured from the first attempt.
    pub time_limit: Duration,

    /// Probability a drawn light is green.
    pub green_probability: f64,
}

impl Default for RedLightConfig {
    fn default() -> Self {
        Self {
            required_successes: red_light::REQUIRED_SUCCESSES,
            time_limit: red_light::TIME_LIMIT,
            green_probability: red_light::GREEN_PROBABILITY,
        }
    }
}

impl RedLightConfig {
    pub fn with_required_successes(mut self, required: u32) -> Self {
        self.required_successes = required;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }
}

/// Glass-Bridge parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Panels to cross.
    pub total_steps: u32,

    /// Chance a chosen panel (after the first) holds.
    pub safe_probability: f64,

    /// Alive players needed before a guaranteed player is drawn.
    pub guarantee_min_alive: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            total_steps: glass_bridge::TOTAL_STEPS,
            safe_probability: glass_bridge::P_SAFE,
            guarantee_min_alive: glass_bridge::GUARANTEE_MIN_ALIVE,
        }
    }
}

impl BridgeConfig {
    pub fn with_total_steps(mut self, steps: u32) -> Self {
        self.total_steps = steps;
        self
    }

    pub fn with_safe_probability(mut self, probability: f64) -> Self {
        self.safe_probability = probability;
        self
    }
}

/// Tug-of-War simulation parameters. Units are track units and seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TugConfig {
    pub track_width: f64,
    pub target_width: f64,
    pub bar_min: f64,
    /// Bar cap as a fraction of the track width.
    pub bar_max_ratio: f64,
    pub shrink_speed: f64,
    pub base_increment: f64,
    pub max_bonus: f64,
    /// Numerator of the tap-frequency bonus.
    pub bonus_scale: f64,
    /// Floor on the tap gap used for the bonus.
    pub min_tap_gap: f64,
    /// Upper clamp on a simulation step.
    pub max_dt: f64,
    /// Strength gained per second of alignment.
    pub strength_rate: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub max_accel: f64,
    /// Range the acceleration hold time is drawn from.
    pub accel_interval: (f64, f64),
    pub edge_margin: f64,
    pub target_start_x: f64,
    /// Turn length, started by the first tap.
    pub duration: Duration,
}

impl Default for TugConfig {
    fn default() -> Self {
        Self {
            track_width: tug_of_war::TRACK_W,
            target_width: tug_of_war::TARGET_W,
            bar_min: tug_of_war::BAR_MIN,
            bar_max_ratio: tug_of_war::BAR_MAX_RATIO,
            shrink_speed: tug_of_war::SHRINK_SPEED,
            base_increment: tug_of_war::BASE_INC,
            max_bonus: tug_of_war::MAX_BONUS,
            bonus_scale: tug_of_war::BONUS_SCALE,
            min_tap_gap: tug_of_war::MIN_TAP_GAP,
            max_dt: tug_of_war::MAX_DT,
            strength_rate: tug_of_war::STRENGTH_RATE,
            min_velocity: tug_of_war::MIN_V,
            max_velocity: tug_of_war::MAX_V,
            max_accel: tug_of_war::MAX_ACCEL,
            accel_interval: tug_of_war::ACCEL_INTERVAL,
            edge_margin: tug_of_war::EDGE_MARGIN,
            target_start_x: tug_of_war::TARGET_START_X,
            duration: tug_of_war::DURATION,
        }
    }
}

impl TugConfig {
    /// Maximum bar width.
    #[must_use]
    pub fn bar_max(&self) -> f64 {
        self.track_width * self.bar_max_ratio
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Complete tournament configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub red_light: RedLightConfig,
    pub bridge: BridgeConfig,
    pub tug: TugConfig,
}

impl TournamentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_red_light(mut self, config: RedLightConfig) -> Self {
        self.red_light = config;
        self
    }

    pub fn with_bridge(mut self, config: BridgeConfig) -> Self {
        self.bridge = config;
        self
    }

    pub fn with_tug(mut self, config: TugConfig) -> Self {
        self.tug = config;
        self
    }
}
