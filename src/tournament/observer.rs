//! Report port: structured events streamed out of a run.

use serde::Serialize;

use super::report::{FinalReport, RoundSummary};
use crate::core::PlayerId;
use crate::games::{GameKind, StepRecord, TurnOutcome};

/// Receives everything the engine decides, as it happens.
///
/// Every hook defaults to doing nothing; `()` is the silent observer.
pub trait Observer {
    /// Rules for `game`, sent once before its first round.
    fn on_rules(&mut self, _game: GameKind, _rules: &[&'static str]) {}

    fn on_round_start(&mut self, _game: GameKind, _alive: usize) {}

    /// One attempt, panel or tap.
    fn on_step(&mut self, _player: PlayerId, _step: &StepRecord) {}

    /// A finished turn, including no-op turns.
    fn on_turn(&mut self, _outcome: &TurnOutcome) {}

    /// Players removed by a post-round survivor reduction.
    fn on_reduction(&mut self, _game: GameKind, _eliminated: &[PlayerId]) {}

    fn on_round_end(&mut self, _summary: &RoundSummary) {}

    fn on_final(&mut self, _report: &FinalReport) {}
}

impl Observer for () {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_rules(&mut self, game: GameKind, rules: &[&'static str]) {
        (**self).on_rules(game, rules);
    }

    fn on_round_start(&mut self, game: GameKind, alive: usize) {
        (**self).on_round_start(game, alive);
    }

    fn on_step(&mut self, player: PlayerId, step: &StepRecord) {
        (**self).on_step(player, step);
    }

    fn on_turn(&mut self, outcome: &TurnOutcome) {
        (**self).on_turn(outcome);
    }

    fn on_reduction(&mut self, game: GameKind, eliminated: &[PlayerId]) {
        (**self).on_reduction(game, eliminated);
    }

    fn on_round_end(&mut self, summary: &RoundSummary) {
        (**self).on_round_end(summary);
    }

    fn on_final(&mut self, report: &FinalReport) {
        (**self).on_final(report);
    }
}

/// Everything an `Observer` can see, as data.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TournamentEvent {
    Rules { game: GameKind, rules: Vec<String> },
    RoundStarted { game: GameKind, alive: usize },
    Step { player: PlayerId, step: StepRecord },
    Turn { outcome: TurnOutcome },
    Reduction { game: GameKind, eliminated: Vec<PlayerId> },
    RoundEnded { summary: RoundSummary },
    Final { report: FinalReport },
}

/// Observer that keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<TournamentEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[TournamentEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TournamentEvent> {
        self.events
    }

    /// Recorded steps with the player who took them.
    pub fn steps(&self) -> impl Iterator<Item = (PlayerId, &StepRecord)> {
        self.events.iter().filter_map(|e| match e {
            TournamentEvent::Step { player, step } => Some((*player, step)),
            _ => None,
        })
    }

    pub fn turns(&self) -> impl Iterator<Item = &TurnOutcome> {
        self.events.iter().filter_map(|e| match e {
            TournamentEvent::Turn { outcome } => Some(outcome),
            _ => None,
        })
    }

    /// Games whose rules were announced, in announcement order.
    pub fn rules_shown(&self) -> impl Iterator<Item = GameKind> + '_ {
        self.events.iter().filter_map(|e| match e {
            TournamentEvent::Rules { game, .. } => Some(*game),
            _ => None,
        })
    }
}

impl Observer for Recorder {
    fn on_rules(&mut self, game: GameKind, rules: &[&'static str]) {
        self.events.push(TournamentEvent::Rules {
            game,
            rules: rules.iter().map(|r| r.to_string()).collect(),
        });
    }

    fn on_round_start(&mut self, game: GameKind, alive: usize) {
        self.events.push(TournamentEvent::RoundStarted { game, alive });
    }

    fn on_step(&mut self, player: PlayerId, step: &StepRecord) {
        self.events.push(TournamentEvent::Step {
            player,
            step: step.clone(),
        });
    }

    fn on_turn(&mut self, outcome: &TurnOutcome) {
        self.events.push(TournamentEvent::Turn {
            outcome: outcome.clone(),
        });
    }

    fn on_reduction(&mut self, game: GameKind, eliminated: &[PlayerId]) {
        self.events.push(TournamentEvent::Reduction {
            game,
            eliminated: eliminated.to_vec(),
        });
    }

    fn on_round_end(&mut self, summary: &RoundSummary) {
        self.events.push(TournamentEvent::RoundEnded {
            summary: summary.clone(),
        });
    }

    fn on_final(&mut self, report: &FinalReport) {
        self.events.push(TournamentEvent::Final {
            report: report.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_filters() {
        let mut recorder = Recorder::new();
        recorder.on_rules(GameKind::TugOfWar, GameKind::TugOfWar.rules());
        recorder.on_round_start(GameKind::TugOfWar, 2);
        recorder.on_reduction(GameKind::TugOfWar, &[PlayerId::new(1)]);

        assert_eq!(recorder.events().len(), 3);
        assert_eq!(recorder.rules_shown().collect::<Vec<_>>(), vec![GameKind::TugOfWar]);
        assert_eq!(recorder.steps().count(), 0);
        assert_eq!(recorder.turns().count(), 0);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = TournamentEvent::RoundStarted {
            game: GameKind::GlassBridge,
            alive: 4,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "round_started");
        assert_eq!(json["game"], "GlassBridge");
        assert_eq!(json["alive"], 4);
    }
}
