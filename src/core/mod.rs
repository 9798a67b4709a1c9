//! Core engine types: players, roster, RNG, clock, input port, configuration.
//!
//! Nothing here knows the rules of a particular minigame. Games receive
//! these pieces explicitly on every call rather than through globals.

pub mod player;
pub mod rng;
pub mod clock;
pub mod input;
pub mod config;
pub mod error;

pub use player::{Elimination, Player, PlayerId, Roster};
pub use rng::{FixedRandom, GameRng, RandomSource};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use input::{tap_burst, Movement, PlayerInput, ScriptedInput, Side, TugSignal};
pub use config::{BridgeConfig, RedLightConfig, TournamentConfig, TugConfig};
pub use error::{InputError, ParseChoiceError, Result, RosterError, TournamentError};
