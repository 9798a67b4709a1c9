//! Input port: how the engine asks a player for decisions.
//!
//! The engine never reads a terminal. A transport (console, HTTP, test
//! harness) implements `PlayerInput` and hands back raw tokens; parsing and
//! the invalid-input policy live in the minigames.

use std::collections::VecDeque;
use std::str::FromStr;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{InputError, ParseChoiceError};
use super::player::Player;
use crate::games::{Light, TugView};

/// Red-Light-Green-Light action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    Move,
    Stay,
}

impl Movement {
    /// Parse a raw token, treating anything unrecognized as `Stay`.
    #[must_use]
    pub fn from_token_or_stay(token: &str) -> Self {
        token.parse().unwrap_or(Movement::Stay)
    }
}

impl FromStr for Movement {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "move" => Ok(Movement::Move),
            "s" | "stay" => Ok(Movement::Stay),
            _ => Err(ParseChoiceError {
                expected: "move/stay",
                token: s.to_string(),
            }),
        }
    }
}

/// Glass-Bridge panel side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Side::Left),
            "r" | "right" => Ok(Side::Right),
            _ => Err(ParseChoiceError {
                expected: "left/right",
                token: s.to_string(),
            }),
        }
    }
}

/// One Tug-of-War input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TugSignal {
    /// A tap, stamped with its arrival time on the transport's clock.
    Tap { at: Duration },
    /// The player ends their turn early.
    Stop,
}

/// Evenly spaced taps, handy for scripts.
///
/// ```
/// use std::time::Duration;
/// use survival_tournament::core::{tap_burst, TugSignal};
///
/// let taps = tap_burst(Duration::ZERO, Duration::from_millis(50), 3);
/// assert_eq!(taps[2], TugSignal::Tap { at: Duration::from_millis(100) });
/// ```
pub fn tap_burst(start: Duration, interval: Duration, count: usize) -> Vec<TugSignal> {
    (0..count)
        .map(|i| TugSignal::Tap {
            at: start + interval * i as u32,
        })
        .collect()
}

/// Decision source for every minigame.
///
/// Calls are synchronous and made one at a time, in roster order.
pub trait PlayerInput {
    /// Ask for a `move`/`stay` token. The player sees the current light.
    fn red_light_action(&mut self, player: &Player, light: Light) -> Result<String, InputError>;

    /// Ask for a `left`/`right` token for the 0-based `step`.
    fn bridge_choice(&mut self, player: &Player, step: u32) -> Result<String, InputError>;

    /// Wait for the next tap or stop. `view` is the state after the
    /// previous tap.
    fn tug_signal(&mut self, player: &Player, view: &TugView) -> Result<TugSignal, InputError>;
}

impl<I: PlayerInput + ?Sized> PlayerInput for &mut I {
    fn red_light_action(&mut self, player: &Player, light: Light) -> Result<String, InputError> {
        (**self).red_light_action(player, light)
    }

    fn bridge_choice(&mut self, player: &Player, step: u32) -> Result<String, InputError> {
        (**self).bridge_choice(player, step)
    }

    fn tug_signal(&mut self, player: &Player, view: &TugView) -> Result<TugSignal, InputError> {
        (**self).tug_signal(player, view)
    }
}

#[derive(Clone, Debug, Default)]
struct Script {
    red_light: VecDeque<String>,
    bridge: VecDeque<String>,
    tug: VecDeque<TugSignal>,
}

/// Pre-recorded answers per player name.
///
/// Each queue is consumed front to back; asking past its end returns
/// `InputError::Closed`, except Tug-of-War which answers `Stop`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    scripts: FxHashMap<String, Script>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue Red-Light-Green-Light tokens for `player`.
    #[must_use]
    pub fn red_light<I, S>(mut self, player: &str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script(player)
            .red_light
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Queue Glass-Bridge tokens for `player`.
    #[must_use]
    pub fn bridge<I, S>(mut self, player: &str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script(player)
            .bridge
            .extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Queue Tug-of-War signals for `player`.
    #[must_use]
    pub fn tug(mut self, player: &str, signals: impl IntoIterator<Item = TugSignal>) -> Self {
        self.script(player).tug.extend(signals);
        self
    }

    /// Unanswered Red-Light tokens left for `player`.
    #[must_use]
    pub fn remaining_red_light(&self, player: &str) -> usize {
        self.scripts.get(player).map_or(0, |s| s.red_light.len())
    }

    /// Unanswered Glass-Bridge tokens left for `player`.
    #[must_use]
    pub fn remaining_bridge(&self, player: &str) -> usize {
        self.scripts.get(player).map_or(0, |s| s.bridge.len())
    }

    fn script(&mut self, player: &str) -> &mut Script {
        self.scripts.entry(player.to_string()).or_default()
    }
}

impl PlayerInput for ScriptedInput {
    fn red_light_action(&mut self, player: &Player, _light: Light) -> Result<String, InputError> {
        self.script(player.name())
            .red_light
            .pop_front()
            .ok_or(InputError::Closed)
    }

    fn bridge_choice(&mut self, player: &Player, _step: u32) -> Result<String, InputError> {
        self.script(player.name())
            .bridge
            .pop_front()
            .ok_or(InputError::Closed)
    }

    fn tug_signal(&mut self, player: &Player, _view: &TugView) -> Result<TugSignal, InputError> {
        Ok(self
            .script(player.name())
            .tug
            .pop_front()
            .unwrap_or(TugSignal::Stop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_movement_parsing() {
        assert_eq!("m".parse::<Movement>(), Ok(Movement::Move));
        assert_eq!(" MOVE ".parse::<Movement>(), Ok(Movement::Move));
        assert_eq!("stay".parse::<Movement>(), Ok(Movement::Stay));
        assert!("jump".parse::<Movement>().is_err());

        assert_eq!(Movement::from_token_or_stay("jump"), Movement::Stay);
        assert_eq!(Movement::from_token_or_stay(""), Movement::Stay);
        assert_eq!(Movement::from_token_or_stay("Move"), Movement::Move);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("Left".parse::<Side>(), Ok(Side::Left));
        assert_eq!("r".parse::<Side>(), Ok(Side::Right));

        let err = "middle".parse::<Side>().unwrap_err();
        assert_eq!(err.token, "middle");
        assert_eq!(err.to_string(), "unrecognized left/right token \"middle\"");
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Right.to_string(), "right");
    }

    #[test]
    fn test_scripted_input_queues_per_player() {
        let mut input = ScriptedInput::new()
            .red_light("a", ["move", "stay"])
            .bridge("b", ["left"]);
        let a = Player::new(PlayerId::new(0), "a");
        let b = Player::new(PlayerId::new(1), "b");

        assert_eq!(input.red_light_action(&a, Light::Green).unwrap(), "move");
        assert_eq!(input.remaining_red_light("a"), 1);
        assert_eq!(input.red_light_action(&a, Light::Red).unwrap(), "stay");
        assert_eq!(input.red_light_action(&a, Light::Red), Err(InputError::Closed));

        assert_eq!(input.bridge_choice(&b, 0).unwrap(), "left");
        assert_eq!(input.bridge_choice(&b, 1), Err(InputError::Closed));
        assert_eq!(input.remaining_bridge("b"), 0);
    }

    #[test]
    fn test_scripted_tug_defaults_to_stop() {
        let mut input = ScriptedInput::new().tug("a", tap_burst(Duration::ZERO, Duration::from_millis(100), 1));
        let a = Player::new(PlayerId::new(0), "a");
        let view = TugView::default();

        assert_eq!(
            input.tug_signal(&a, &view).unwrap(),
            TugSignal::Tap { at: Duration::ZERO }
        );
        assert_eq!(input.tug_signal(&a, &view).unwrap(), TugSignal::Stop);
    }
}
