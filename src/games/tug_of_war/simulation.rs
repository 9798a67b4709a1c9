//! Real-time bar/target micro-simulation behind one Tug-of-War turn.
//!
//! The track runs from 0 to `track_width`. The player's bar grows from the
//! left edge with each tap and shrinks while idle; its right end is the tip.
//! A target window of `target_width` wanders along the track as a bounded
//! random walk. Strength accrues only while the tip sits in the window.
//!
//! Time advances only on taps. Each tap, in order:
//! 1. advances the target by `dt` (clamped to `max_dt`)
//! 2. shrinks the bar by `shrink_speed * dt`
//! 3. grows the bar by `base_increment * (1 + bonus)` where the bonus
//!    rewards short gaps between taps
//! 4. accrues `strength_rate * dt` if the tip is inside the window
//!
//! The first tap starts the clock with `dt = 0`, so it never scores.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{RandomSource, TugConfig};

/// Snapshot shown to the input collaborator between taps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TugView {
    pub tip: f64,
    pub window_start: f64,
    pub window_end: f64,
    pub strength: f64,
    pub taps: u32,
    /// When the turn ends, once the first tap has started the timer.
    /// `None` if that instant is not representable.
    pub deadline: Option<Duration>,
}

impl TugView {
    /// Whether the tip currently sits inside the window.
    #[must_use]
    pub fn aligned(&self) -> bool {
        self.tip >= self.window_start && self.tip <= self.window_end
    }
}

/// Result of one simulated tap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TapStep {
    pub dt: f64,
    pub tip: f64,
    pub window_start: f64,
    pub window_end: f64,
    pub aligned: bool,
    pub gain: f64,
    pub strength: f64,
}

/// The wandering target window.
#[derive(Clone, Debug, PartialEq)]
struct Target {
    x: f64,
    velocity: f64,
    accel: f64,
    accel_timer: f64,
}

#[derive(Clone, Debug)]
pub struct TugSimulation {
    config: TugConfig,
    target: Target,
    bar_width: f64,
    started_at: Option<Duration>,
    last_tap: Option<Duration>,
    strength: f64,
    taps: u32,
}

impl TugSimulation {
    /// Fresh turn state. Draws the target's first acceleration.
    pub fn new(config: &TugConfig, rng: &mut dyn RandomSource) -> Self {
        let mut sim = Self {
            config: config.clone(),
            target: Target {
                x: config.target_start_x,
                velocity: 0.0,
                accel: 0.0,
                accel_timer: 0.0,
            },
            bar_width: config.bar_min,
            started_at: None,
            last_tap: None,
            strength: 0.0,
            taps: 0,
        };
        sim.randomize_accel(rng);
        sim
    }

    #[must_use]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    #[must_use]
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    #[must_use]
    pub fn target_x(&self) -> f64 {
        self.target.x
    }

    #[must_use]
    pub fn target_velocity(&self) -> f64 {
        self.target.velocity
    }

    #[must_use]
    pub fn taps(&self) -> u32 {
        self.taps
    }

    #[must_use]
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// `true` once the turn timer has run out at time `at`.
    ///
    /// Never true before the first tap.
    #[must_use]
    pub fn is_expired(&self, at: Duration) -> bool {
        self.started_at
            .is_some_and(|t0| at.saturating_sub(t0) >= self.config.duration)
    }

    #[must_use]
    pub fn view(&self) -> TugView {
        TugView {
            tip: self.bar_width,
            window_start: self.target.x,
            window_end: self.target.x + self.config.target_width,
            strength: self.strength,
            taps: self.taps,
            deadline: self.started_at.and_then(|t0| t0.checked_add(self.config.duration)),
        }
    }

    /// Apply one tap arriving at `at`.
    ///
    /// Callers check `is_expired` first; this never refuses a tap.
    /// Timestamps earlier than the previous tap count as `dt = 0`.
    pub fn tap(&mut self, at: Duration, rng: &mut dyn RandomSource) -> TapStep {
        if self.started_at.is_none() {
            self.started_at = Some(at);
        }
        let previous = self.last_tap.unwrap_or(at);
        self.last_tap = Some(at);

        let gap = at.saturating_sub(previous).as_secs_f64();
        let dt = gap.min(self.config.max_dt);

        self.advance_target(dt, rng);

        self.bar_width = (self.bar_width - self.config.shrink_speed * dt).max(self.config.bar_min);

        let bonus = (self.config.bonus_scale / gap.max(self.config.min_tap_gap)).min(self.config.max_bonus);
        let increment = self.config.base_increment * (1.0 + bonus);
        self.bar_width = (self.bar_width + increment).min(self.config.bar_max());

        let view = self.view();
        let aligned = view.aligned();
        let gain = if aligned { dt * self.config.strength_rate } else { 0.0 };
        self.strength += gain;
        self.taps += 1;

        TapStep {
            dt,
            tip: view.tip,
            window_start: view.window_start,
            window_end: view.window_end,
            aligned,
            gain,
            strength: self.strength,
        }
    }

    fn randomize_accel(&mut self, rng: &mut dyn RandomSource) {
        let (low, high) = self.config.accel_interval;
        self.target.accel = rng.gen_range_f64(-self.config.max_accel, self.config.max_accel);
        self.target.accel_timer = rng.gen_range_f64(low, high);
    }

    fn advance_target(&mut self, dt: f64, rng: &mut dyn RandomSource) {
        let cfg = &self.config;
        let (min_v, max_v) = (cfg.min_velocity, cfg.max_velocity);
        let left = cfg.edge_margin;
        let right = cfg.track_width - cfg.edge_margin - cfg.target_width;

        self.target.accel_timer -= dt;
        if self.target.accel_timer <= 0.0 {
            self.randomize_accel(rng);
        }

        let mut v = self.target.velocity + self.target.accel * dt;
        if v.abs() < min_v {
            v = if v >= 0.0 { min_v } else { -min_v };
        }
        self.target.velocity = v.clamp(-max_v, max_v);
        self.target.x += self.target.velocity * dt;

        if self.target.x < left {
            self.target.x = left;
            self.target.velocity = self.target.velocity.abs();
            self.randomize_accel(rng);
        }
        if self.target.x > right {
            self.target.x = right;
            self.target.velocity = -self.target.velocity.abs();
            self.randomize_accel(rng);
        }
    }
}
