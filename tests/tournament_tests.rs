//! End-to-end tournament runs.
//!
//! These tests drive full tournaments through the public API with scripted
//! input, a manual clock and fixed or seeded randomness.

use std::thread;
use std::time::Duration;

use survival_tournament::{
    tap_burst, EliminationCause, FinalReport, FixedRandom, GameKind, GameRng, InputError, Light, ManualClock,
    Player, PlayerInput, Recorder, Roster, ScriptedInput, StepRecord, Tournament, TournamentConfig,
    TournamentEvent, TugSignal, TugView,
};

/// Answers forever by cycling through fixed patterns.
struct CyclingInput {
    moves: Vec<&'static str>,
    sides: Vec<&'static str>,
    gaps_ms: Vec<u64>,
    cursor: usize,
    tug_at: Duration,
}

impl CyclingInput {
    fn new(gaps_ms: Vec<u64>) -> Self {
        Self {
            moves: vec!["m", "s", "move", "jump"],
            sides: vec!["l", "right", "left"],
            gaps_ms,
            cursor: 0,
            tug_at: Duration::ZERO,
        }
    }
}

fn pick<T: Copy>(items: &[T], cursor: &mut usize) -> T {
    let item = items[*cursor % items.len()];
    *cursor += 1;
    item
}

impl PlayerInput for CyclingInput {
    fn red_light_action(&mut self, _player: &Player, _light: Light) -> Result<String, InputError> {
        Ok(pick(&self.moves, &mut self.cursor).to_string())
    }

    fn bridge_choice(&mut self, _player: &Player, _step: u32) -> Result<String, InputError> {
        Ok(pick(&self.sides, &mut self.cursor).to_string())
    }

    fn tug_signal(&mut self, _player: &Player, view: &TugView) -> Result<TugSignal, InputError> {
        if view.taps == 0 {
            self.tug_at = Duration::ZERO;
        }
        let at = self.tug_at;
        self.tug_at += Duration::from_millis(pick(&self.gaps_ms, &mut self.cursor));
        Ok(TugSignal::Tap { at })
    }
}

fn seeded_run(seed: u64, players: usize) -> FinalReport {
    let config = TournamentConfig::default().with_seed(seed);
    let mut tournament = Tournament::with_parts(
        Roster::numbered(players).unwrap(),
        &config,
        GameRng::new(seed),
        ManualClock::new(),
    );
    let mut input = CyclingInput::new(vec![45, 60, 38, 120]);
    tournament.run(&mut input, &mut ()).unwrap()
}

/// Two players who play every game perfectly until Tug-of-War, where only
/// one of them taps.
#[test]
fn test_two_player_final() {
    let roster = Roster::new(["Gi-hun", "Sang-woo"]).unwrap();
    let mut tournament = Tournament::with_parts(
        roster,
        &TournamentConfig::default(),
        FixedRandom::new(0.25),
        ManualClock::new(),
    );

    let mut input = ScriptedInput::new()
        .red_light("Gi-hun", ["m", "m", "m", "m"])
        .red_light("Sang-woo", ["move", "move", "move", "move"])
        .bridge("Gi-hun", ["l", "r", "l", "r", "l"])
        .bridge("Sang-woo", ["right", "right", "right", "right", "right"])
        .tug("Gi-hun", tap_burst(Duration::ZERO, Duration::from_millis(50), 220))
        .tug("Sang-woo", [TugSignal::Stop]);
    let mut recorder = Recorder::new();

    let report = tournament.run(&mut input, &mut recorder).unwrap();

    assert!(tournament.is_finished());
    let winner = report.entry("Gi-hun").unwrap();
    let loser = report.entry("Sang-woo").unwrap();
    assert!(winner.survived);
    assert!(winner.final_strength > 0);
    assert!(!loser.survived);
    assert_eq!(loser.final_strength, 0);
    assert_eq!(loser.cause, Some(EliminationCause::Outpulled));

    let text = report.to_string();
    assert!(text.starts_with("=== Final Results ===\n"));
    assert!(text.contains("Sang-woo | ELIMINATED | strength=0"));

    // Rules once per game, final report last
    assert_eq!(recorder.rules_shown().collect::<Vec<_>>(), GameKind::ORDER.to_vec());
    assert!(matches!(recorder.events().last(), Some(TournamentEvent::Final { .. })));
}

/// Steps are streamed in play order, one per light, panel or tap.
#[test]
fn test_event_stream_shape() {
    let mut tournament = Tournament::with_parts(
        Roster::new(["solo"]).unwrap(),
        &TournamentConfig::default(),
        FixedRandom::new(0.25),
        ManualClock::new(),
    );
    let mut input = ScriptedInput::new()
        .red_light("solo", ["m"; 4])
        .bridge("solo", ["l"; 5])
        .tug("solo", tap_burst(Duration::ZERO, Duration::from_millis(100), 3));
    let mut recorder = Recorder::new();

    tournament.run(&mut input, &mut recorder).unwrap();

    let turns: Vec<_> = recorder.turns().collect();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].steps.len(), 4);
    assert_eq!(turns[1].steps.len(), 5);
    assert_eq!(turns[2].steps.len(), 3);
    assert!(turns.iter().all(|t| t.survived()));

    let steps: Vec<_> = recorder.steps().map(|(_, s)| s.clone()).collect();
    assert_eq!(steps.len(), 12);
    assert!(matches!(steps[4], StepRecord::Bridge { step: 0, .. }));
    assert!(matches!(steps[9], StepRecord::Tug { tap: 1, .. }));
}

/// Same seed and same answers give the same tournament.
#[test]
fn test_seeded_tournaments_replay() {
    for seed in [1, 2, 3, 42] {
        assert_eq!(seeded_run(seed, 8), seeded_run(seed, 8));
    }
}

/// Separate tournaments on separate threads match their sequential runs.
#[test]
fn test_concurrent_sessions_are_isolated() {
    let seeds: Vec<u64> = (100..108).collect();
    let sequential: Vec<_> = seeds.iter().map(|&s| seeded_run(s, 6)).collect();

    let handles: Vec<_> = seeds
        .iter()
        .map(|&seed| thread::spawn(move || seeded_run(seed, 6)))
        .collect();
    let parallel: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(sequential, parallel);
}

/// A broken input source stops the run with the game and player named.
#[test]
fn test_closed_input_is_an_error() {
    let mut tournament = Tournament::new(Roster::numbered(3).unwrap(), &TournamentConfig::default().with_seed(5));
    let mut input = ScriptedInput::new();

    let err = tournament.run(&mut input, &mut ()).unwrap_err();

    assert!(err.to_string().contains("Player 1"));
    assert!(!tournament.is_finished());
}

/// Driving rounds one at a time gives the same standings as `run`.
#[test]
fn test_round_by_round_matches_run() {
    let config = TournamentConfig::default();
    let build = || Tournament::with_parts(Roster::numbered(5).unwrap(), &config, GameRng::new(9), ManualClock::new());

    let mut whole = build();
    let expected = whole.run(&mut CyclingInput::new(vec![50, 70]), &mut ()).unwrap();

    let mut stepped = build();
    let mut input = CyclingInput::new(vec![50, 70]);

    let mut survivors = Vec::new();
    while let Some(summary) = stepped.run_round(&mut input, &mut ()).unwrap() {
        survivors.push(summary.survivors);
    }

    assert_eq!(survivors.len(), 3);
    assert!(survivors.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(stepped.report().survivors().count(), *survivors.last().unwrap());
    assert_eq!(stepped.report(), expected);
}
