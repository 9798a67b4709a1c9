//! Tournament orchestration and reporting.
//!
//! - `orchestrator`: runs the roster through the minigame lineup
//! - `observer`: event port for transports and tests
//! - `report`: round summaries and final standings

pub mod observer;
pub mod report;
pub mod orchestrator;

pub use observer::{Observer, Recorder, TournamentEvent};
pub use report::{FinalReport, ReportEntry, RoundSummary};
pub use orchestrator::Tournament;
