//! Round orchestrator.
//!
//! `Tournament` owns the roster, the minigame lineup and the collaborators
//! that outlive a single turn (RNG and clock). Input and observer are
//! borrowed per call, so the same tournament can be driven round by round
//! from a transport layer or run to completion in one go.
//!
//! ## Key Features
//!
//! - **Fixed order**: Red-Light, Glass-Bridge, Tug-of-War
//! - **Rules once**: each game's rules are announced before its first round only
//! - **Full-roster setup**: round setup sees eliminated players too, so an
//!   empty field still opens and closes its round cleanly
//! - **Resumable rounds**: an input failure leaves the round open, and the
//!   next call picks up at the player whose turn failed
//! - **Isolated sessions**: a tournament shares nothing, so separate
//!   tournaments can run on separate threads

use rustc_hash::FxHashSet;
use tracing::{info, warn};

use super::observer::Observer;
use super::report::{FinalReport, RoundSummary};
use crate::core::{
    Clock, GameRng, MonotonicClock, PlayerId, PlayerInput, RandomSource, Result, Roster, TournamentConfig,
    TournamentError,
};
use crate::games::{GameKind, Minigame, TurnContext};

/// A roster's run through the minigame lineup, one round per game.
pub struct Tournament<R: RandomSource = GameRng, C: Clock = MonotonicClock> {
    roster: Roster,
    games: Vec<Minigame>,
    next_round: usize,
    open_round: Option<OpenRound>,
    rules_shown: FxHashSet<GameKind>,
    rng: R,
    clock: C,
}

/// Progress of a round interrupted by an input failure.
#[derive(Clone, Debug)]
struct OpenRound {
    entered: usize,
    /// Roster position of the next turn.
    position: usize,
    turns: usize,
    eliminated: Vec<PlayerId>,
}

impl OpenRound {
    fn new(entered: usize) -> Self {
        Self {
            entered,
            position: 0,
            turns: 0,
            eliminated: Vec::new(),
        }
    }
}

impl Tournament {
    /// Tournament on the wall clock, seeded from `config.seed` or OS entropy.
    pub fn new(roster: Roster, config: &TournamentConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        info!(seed = rng.seed(), players = roster.len(), "tournament created");
        Self::with_parts(roster, config, rng, MonotonicClock::new())
    }
}

impl<R: RandomSource, C: Clock> Tournament<R, C> {
    /// Tournament with caller-supplied randomness and time.
    ///
    /// `config.seed` is ignored; the caller's `rng` is used as given.
    pub fn with_parts(roster: Roster, config: &TournamentConfig, rng: R, clock: C) -> Self {
        Self {
            roster,
            games: Minigame::standard_lineup(config),
            next_round: 0,
            open_round: None,
            rules_shown: FxHashSet::default(),
            rng,
            clock,
        }
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn games(&self) -> &[Minigame] {
        &self.games
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// 0-based index of the next round to run.
    #[must_use]
    pub fn next_round(&self) -> usize {
        self.next_round
    }

    /// The game the next round will run, if any remain.
    #[must_use]
    pub fn next_game(&self) -> Option<GameKind> {
        self.games.get(self.next_round).map(Minigame::kind)
    }

    /// `true` while a round interrupted by an input failure awaits resumption.
    #[must_use]
    pub fn is_round_open(&self) -> bool {
        self.open_round.is_some()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next_round >= self.games.len()
    }

    /// Standings as of now. Complete once `is_finished`.
    #[must_use]
    pub fn report(&self) -> FinalReport {
        FinalReport::from_roster(&self.roster)
    }

    /// Run the next pending round.
    ///
    /// Returns `Ok(None)` once every game has run. On an input failure the
    /// round stays open; calling again resumes it with the player whose
    /// turn failed, and nobody who already played gets another turn.
    pub fn run_round<I, O>(&mut self, input: &mut I, observer: &mut O) -> Result<Option<RoundSummary>>
    where
        I: PlayerInput,
        O: Observer,
    {
        let index = self.next_round;
        let Some(game) = self.games.get_mut(index) else {
            return Ok(None);
        };
        let kind = game.kind();

        let mut round = match self.open_round.take() {
            Some(round) => {
                info!(round = index + 1, game = %kind, position = round.position, "round resumed");
                round
            }
            None => {
                if self.rules_shown.insert(kind) {
                    info!(game = %kind, "announcing rules");
                    observer.on_rules(kind, kind.rules());
                }

                let entered = self.roster.alive_count();
                info!(round = index + 1, game = %kind, alive = entered, "round started");
                observer.on_round_start(kind, entered);

                game.start_round(&self.roster, &mut self.rng);
                OpenRound::new(entered)
            }
        };

        while round.position < self.roster.len() {
            let id = PlayerId::new(round.position as u8);
            let player = &mut self.roster[id];
            if player.is_alive() {
                let mut ctx = TurnContext::new(&mut self.rng, &mut *input, &self.clock, &mut *observer);
                let outcome = match game.play(player, &mut ctx) {
                    Ok(outcome) => outcome,
                    Err(source) => {
                        warn!(game = %kind, player = %player.name(), %source, "input failed, round left open");
                        self.open_round = Some(round);
                        return Err(TournamentError::Input {
                            game: kind,
                            player: player.name().to_string(),
                            source,
                        });
                    }
                };

                observer.on_turn(&outcome);
                if outcome.eliminated().is_some() {
                    round.eliminated.push(id);
                }
                round.turns += 1;
            }
            round.position += 1;
        }

        let reduced = game.post_round(&mut self.roster);
        if !reduced.is_empty() {
            observer.on_reduction(kind, &reduced);
        }
        game.end_round();
        self.next_round += 1;

        let summary = RoundSummary {
            index,
            game: kind,
            entered: round.entered,
            turns: round.turns,
            eliminated: round.eliminated,
            reduced,
            survivors: self.roster.alive_count(),
        };
        info!(
            round = index + 1,
            game = %kind,
            survivors = summary.survivors,
            eliminated = summary.eliminated.len() + summary.reduced.len(),
            "round ended"
        );
        observer.on_round_end(&summary);
        Ok(Some(summary))
    }

    /// Run every remaining round and return the final standings.
    pub fn run<I, O>(&mut self, input: &mut I, observer: &mut O) -> Result<FinalReport>
    where
        I: PlayerInput,
        O: Observer,
    {
        while self.run_round(input, observer)?.is_some() {}

        let report = self.report();
        info!(survivors = report.survivors().count(), players = report.entries.len(), "tournament finished");
        observer.on_final(&report);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{tap_burst, FixedRandom, InputError, ManualClock, Player, ScriptedInput, TugSignal};
    use crate::games::{EliminationCause, Light, StepRecord, TugView};
    use crate::tournament::{Recorder, TournamentEvent};

    fn fixed_tournament(names: &[&str]) -> Tournament<FixedRandom, ManualClock> {
        // 0.25: every light green, every panel holds, target drifts right
        Tournament::with_parts(
            Roster::new(names.iter().copied()).unwrap(),
            &TournamentConfig::default(),
            FixedRandom::new(0.25),
            ManualClock::new(),
        )
    }

    /// Stays on every light for the `slow` players, taking 25s per answer.
    struct Dawdler {
        clock: ManualClock,
        slow: Vec<String>,
        inner: ScriptedInput,
    }

    impl PlayerInput for Dawdler {
        fn red_light_action(&mut self, player: &Player, light: Light) -> std::result::Result<String, InputError> {
            if self.slow.iter().any(|n| n == player.name()) {
                self.clock.advance(Duration::from_secs(25));
                return Ok("stay".to_string());
            }
            self.inner.red_light_action(player, light)
        }

        fn bridge_choice(&mut self, player: &Player, step: u32) -> std::result::Result<String, InputError> {
            self.inner.bridge_choice(player, step)
        }

        fn tug_signal(&mut self, player: &Player, view: &TugView) -> std::result::Result<TugSignal, InputError> {
            self.inner.tug_signal(player, view)
        }
    }

    fn obedient(input: ScriptedInput, name: &str) -> ScriptedInput {
        input
            .red_light(name, ["m"; 4])
            .bridge(name, ["l"; 5])
    }

    #[test]
    fn test_rounds_in_order() {
        let mut t = fixed_tournament(&["a"]);
        let mut input = obedient(ScriptedInput::new(), "a");
        let mut recorder = Recorder::new();

        let mut kinds = Vec::new();
        while let Some(summary) = t.run_round(&mut input, &mut recorder).unwrap() {
            kinds.push(summary.game);
        }

        assert_eq!(kinds, GameKind::ORDER.to_vec());
        assert!(t.is_finished());
        assert_eq!(t.next_game(), None);
        assert_eq!(t.run_round(&mut input, &mut recorder).unwrap(), None);
    }

    #[test]
    fn test_rules_shown_once_per_game() {
        let mut t = fixed_tournament(&["a", "b"]);
        let mut input = obedient(obedient(ScriptedInput::new(), "a"), "b");
        let mut recorder = Recorder::new();

        t.run(&mut input, &mut recorder).unwrap();

        assert_eq!(recorder.rules_shown().collect::<Vec<_>>(), GameKind::ORDER.to_vec());
    }

    #[test]
    fn test_tapper_outlasts_idle_player() {
        let mut t = fixed_tournament(&["tapper", "idle"]);
        let mut input = obedient(obedient(ScriptedInput::new(), "tapper"), "idle")
            .tug("tapper", tap_burst(Duration::ZERO, Duration::from_millis(50), 220));
        let mut recorder = Recorder::new();

        let report = t.run(&mut input, &mut recorder).unwrap();

        let tapper = report.entry("tapper").unwrap();
        let idle = report.entry("idle").unwrap();
        assert!(tapper.survived);
        assert!(tapper.final_strength > 0);
        assert!(!idle.survived);
        assert_eq!(idle.final_strength, 0);
        assert_eq!(idle.eliminated_in, Some(GameKind::TugOfWar));
        assert_eq!(idle.cause, Some(EliminationCause::Outpulled));
        assert!(matches!(recorder.events().last(), Some(TournamentEvent::Final { .. })));
    }

    #[test]
    fn test_input_failure_resumes_round() {
        let mut t = fixed_tournament(&["a", "b", "c"]);
        let mut input = ["a", "b", "c"]
            .into_iter()
            .fold(ScriptedInput::new(), |input, name| input.red_light(name, ["m"; 4]))
            .bridge("a", ["l"; 10])
            .bridge("b", ["r"; 10]);
        let mut recorder = Recorder::new();

        t.run_round(&mut input, &mut recorder).unwrap();

        // "c" has no bridge script
        let err = t.run_round(&mut input, &mut recorder).unwrap_err();
        assert_eq!(
            err,
            TournamentError::Input {
                game: GameKind::GlassBridge,
                player: "c".to_string(),
                source: InputError::Closed,
            }
        );
        assert!(t.is_round_open());
        assert_eq!(t.next_round(), 1);
        assert_eq!(input.remaining_bridge("a"), 5);
        let guaranteed = match &t.games()[1] {
            Minigame::GlassBridge(bridge) => bridge.guaranteed(),
            _ => None,
        };
        assert!(guaranteed.is_some());

        let mut input = input.bridge("c", ["l"; 5]);
        let summary = t.run_round(&mut input, &mut recorder).unwrap().unwrap();

        // Only "c" played on resumption; "a" and "b" kept their crossings
        assert_eq!(input.remaining_bridge("a"), 5);
        assert_eq!(input.remaining_bridge("b"), 5);
        assert_eq!(input.remaining_bridge("c"), 0);
        assert_eq!(summary.entered, 3);
        assert_eq!(summary.turns, 3);
        assert_eq!(summary.survivors, 3);
        assert!(!t.is_round_open());
        assert_eq!(t.next_round(), 2);

        let bridge_starts = recorder
            .events()
            .iter()
            .filter(|e| matches!(e, TournamentEvent::RoundStarted { game: GameKind::GlassBridge, .. }))
            .count();
        assert_eq!(bridge_starts, 1);
        assert_eq!(recorder.turns().filter(|o| o.game == GameKind::GlassBridge).count(), 3);
    }

    #[test]
    fn test_eliminated_players_get_no_turns() {
        let mut t = fixed_tournament(&["a", "b"]);
        let mut input = Dawdler {
            clock: t.clock().clone(),
            slow: vec!["b".to_string()],
            inner: obedient(ScriptedInput::new(), "a"),
        };
        let mut recorder = Recorder::new();

        let summary = t.run_round(&mut input, &mut recorder).unwrap().unwrap();
        assert_eq!(summary.eliminated, vec![PlayerId::new(1)]);
        assert_eq!(
            t.roster()[PlayerId::new(1)].elimination().map(|e| e.cause),
            Some(EliminationCause::Timeout)
        );

        // "b" has no bridge script, so a turn for "b" would fail
        let summary = t.run_round(&mut input, &mut recorder).unwrap().unwrap();
        assert_eq!(summary.entered, 1);
        assert_eq!(summary.turns, 1);
    }

    #[test]
    fn test_empty_field_still_runs_rounds() {
        let mut t = fixed_tournament(&["a", "b", "c"]);
        let mut input = Dawdler {
            clock: t.clock().clone(),
            slow: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            inner: ScriptedInput::new(),
        };
        let mut recorder = Recorder::new();

        let report = t.run(&mut input, &mut recorder).unwrap();

        // Everyone times out in the first round; the rest open and close empty
        assert_eq!(report.survivors().count(), 0);
        let ended: Vec<_> = recorder
            .events()
            .iter()
            .filter_map(|e| match e {
                TournamentEvent::RoundEnded { summary } => Some((summary.game, summary.turns)),
                _ => None,
            })
            .collect();
        assert_eq!(
            ended,
            vec![
                (GameKind::RedLightGreenLight, 3),
                (GameKind::GlassBridge, 0),
                (GameKind::TugOfWar, 0),
            ]
        );
        assert_eq!(recorder.rules_shown().count(), 3);
    }

    #[test]
    fn test_steps_are_streamed() {
        let mut t = fixed_tournament(&["a"]);
        let mut input = obedient(ScriptedInput::new(), "a");
        let mut recorder = Recorder::new();

        t.run_round(&mut input, &mut recorder).unwrap();

        let steps: Vec<_> = recorder.steps().collect();
        assert_eq!(steps.len(), 4);
        assert!(steps
            .iter()
            .all(|(id, s)| *id == PlayerId::new(0) && matches!(s, StepRecord::RedLight { survived: true, .. })));
    }

    #[test]
    fn test_seeded_runs_match() {
        let run = |seed| {
            let config = TournamentConfig::default().with_seed(seed);
            let mut t = Tournament::with_parts(
                Roster::numbered(6).unwrap(),
                &config,
                GameRng::new(seed),
                ManualClock::new(),
            );
            let mut input = ScriptedInput::new();
            for p in 1..=6 {
                let name = format!("Player {p}");
                input = input
                    .red_light(&name, ["move"; 40])
                    .bridge(&name, ["right"; 5])
                    .tug(&name, tap_burst(Duration::ZERO, Duration::from_millis(40 + p), 300));
            }
            t.run(&mut input, &mut ()).unwrap()
        };

        assert_eq!(run(17), run(17));
    }

    #[test]
    fn test_new_uses_config_seed() {
        let config = TournamentConfig::default().with_seed(99);
        let t = Tournament::new(Roster::numbered(2).unwrap(), &config);

        assert_eq!(t.rng().seed(), 99);
        assert_eq!(t.games().len(), 3);
        assert!(!t.is_finished());
        assert_eq!(t.next_game(), Some(GameKind::RedLightGreenLight));
    }
}
