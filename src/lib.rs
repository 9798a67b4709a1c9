//! # survival-tournament
//!
//! An elimination tournament engine: a fixed roster passes through three
//! minigames in order, each with its own survival rule, until a final
//! survivor set remains.
//!
//! ## Design Principles
//!
//! 1. **Explicit collaborators**: randomness, time, player input and event
//!    reporting are ports handed to the engine. Nothing reads globals.
//!
//! 2. **Deterministic when asked**: a seeded `GameRng` plus a `ManualClock`
//!    and scripted input replay a tournament exactly.
//!
//! 3. **Rules never fail**: timeouts, bad tokens and dead players resolve to
//!    eliminations or no-ops. Only a broken input source is an error.
//!
//! ## Modules
//!
//! - `core`: players, roster, RNG, clock, input port, configuration, errors
//! - `games`: Red-Light-Green-Light, Glass-Bridge, Tug-of-War
//! - `tournament`: round orchestrator, observer port, final report
//!
//! ## Example
//!
//! ```
//! use survival_tournament::{Roster, ScriptedInput, Tournament, TournamentConfig};
//!
//! let roster = Roster::new(["Gi-hun", "Sang-woo"]).unwrap();
//! let mut tournament = Tournament::new(roster, &TournamentConfig::default().with_seed(7));
//!
//! // Nobody answers: the first turn reports a closed input source
//! let err = tournament.run(&mut ScriptedInput::new(), &mut ()).unwrap_err();
//! assert!(err.to_string().contains("Red Light Green Light"));
//! ```

pub mod core;
pub mod games;
pub mod tournament;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, MonotonicClock,
    FixedRandom, GameRng, RandomSource,
    Elimination, Player, PlayerId, Roster,
    Movement, PlayerInput, ScriptedInput, Side, TugSignal, tap_burst,
    BridgeConfig, RedLightConfig, TournamentConfig, TugConfig,
    InputError, ParseChoiceError, Result, RosterError, TournamentError,
};

pub use crate::games::{
    EliminationCause, GameKind, GlassBridge, Light, Minigame, RedLightGreenLight,
    StepRecord, TugOfWar, TugSimulation, TugView, TurnContext, TurnOutcome, TurnStatus,
};

pub use crate::tournament::{
    FinalReport, Observer, Recorder, ReportEntry, RoundSummary, Tournament, TournamentEvent,
};
