use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use snake_core::render::PagedTransmitter;
use snake_core::replay::headless_session;
use snake_core::rng::SeededRng;
use snake_core::sim::GameSnapshot;
use snake_core::tape::serialize_tape;
use snake_core::{replay, ButtonEvent, Control, Event, Mode, Session};

use crate::terminal::TerminalSink;
use crate::util::seed_to_hex;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: String,
    pub events: u32,
    pub exited: bool,
    pub frames_started: u32,
    pub frames_completed: u32,
    pub pages_sent: u64,
    pub state: GameSnapshot,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub summary: RunSummary,
    pub screen: String,
}

/// Drives a live session through `events`, streaming every composed frame
/// into a [`TerminalSink`]. Stops early if the session asks to exit.
pub fn run_events(seed: u32, events: &[Event], echo_frames: bool) -> RunArtifact {
    let mut session = Session::new(
        SeededRng::new(seed),
        PagedTransmitter::new(TerminalSink::new(echo_frames)),
    );
    let mut consumed = 0u32;
    let mut exited = false;

    for event in events {
        consumed += 1;
        if session.handle(*event) == Control::Exit {
            tracing::info!(event = consumed - 1, "session exited");
            exited = true;
            break;
        }
    }

    let renderer = session.renderer();
    let transmitter = renderer.transmitter();
    RunArtifact {
        summary: RunSummary {
            seed: seed_to_hex(seed),
            events: consumed,
            exited,
            frames_started: renderer.frames_started(),
            frames_completed: renderer.frames_completed(),
            pages_sent: transmitter.pages_sent(),
            state: session.game().snapshot(),
        },
        screen: transmitter.sink().screen(),
    }
}

/// Tape for `events` with the footer claims filled in by a replay. Events
/// after an exit are not recorded.
pub fn record_tape(seed: u32, events: &[Event]) -> Vec<u8> {
    let result = replay(seed, events);
    let recorded = &events[..result.event_count as usize];
    serialize_tape(
        seed,
        recorded,
        result.final_length,
        result.final_ticks,
        result.final_rng_state,
    )
}

pub fn write_tape(path: &Path, tape: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }
    }
    fs::write(path, tape).with_context(|| format!("failed writing tape {}", path.display()))
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SoakFailure {
    pub seed: String,
    pub event_index: u32,
    pub rule: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SoakRun {
    pub seed: String,
    pub games_started: u32,
    pub deaths: u32,
    pub max_length: i32,
    pub max_speed: u8,
    pub ticks_played: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SoakReport {
    pub seeds: u32,
    pub events_per_seed: u32,
    pub runs: Vec<SoakRun>,
    pub failures: Vec<SoakFailure>,
}

impl SoakReport {
    pub fn ensure_clean(&self) -> Result<()> {
        if let Some(first) = self.failures.first() {
            bail!(
                "{} of {} seeds broke an invariant; first: seed {} event {} rule {}",
                self.failures.len(),
                self.seeds,
                first.seed,
                first.event_index,
                first.rule
            );
        }
        Ok(())
    }
}

/// Pseudo-random player: mostly ticks and page acknowledgements, with turns,
/// pauses and restarts mixed in. Never asks the menu to exit.
fn soak_one(seed: u32, events: u32) -> std::result::Result<SoakRun, SoakFailure> {
    let mut session = headless_session(seed);
    let mut driver = SeededRng::new(seed ^ 0x9E37_79B9);
    let mut run = SoakRun {
        seed: seed_to_hex(seed),
        games_started: 0,
        deaths: 0,
        max_length: 0,
        max_speed: 0,
        ticks_played: 0,
    };

    for index in 0..events {
        let mode = session.game().mode();
        let event = match driver.next() % 100 {
            0..=54 => Event::Tick,
            55..=84 => Event::DisplayProcessed,
            85..=91 if mode == Mode::Menu => Event::Button(ButtonEvent::Right),
            85..=91 => Event::Button(ButtonEvent::Left),
            92..=98 => Event::Button(ButtonEvent::Right),
            _ => Event::Button(ButtonEvent::Both),
        };

        let control = session.handle(event);
        debug_assert_eq!(control, Control::Continue);

        let game = session.game();
        if let Err(rule) = game.validate_invariants() {
            return Err(SoakFailure {
                seed: seed_to_hex(seed),
                event_index: index,
                rule: rule.to_string(),
            });
        }

        match (mode, game.mode()) {
            (Mode::Menu, Mode::Playing) => run.games_started += 1,
            (Mode::Playing, Mode::Dead { .. }) => run.deaths += 1,
            _ => {}
        }
        if game.mode() == Mode::Playing {
            if event == Event::Tick {
                run.ticks_played += 1;
            }
            run.max_length = run.max_length.max(game.snake().target_length());
            run.max_speed = run.max_speed.max(game.snake().speed());
        }
    }

    Ok(run)
}

pub fn soak(seeds: &[u32], events_per_seed: u32) -> SoakReport {
    let results: Vec<_> = seeds
        .par_iter()
        .map(|&seed| soak_one(seed, events_per_seed))
        .collect();

    let mut runs = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(run) => runs.push(run),
            Err(failure) => {
                tracing::error!(
                    seed = %failure.seed,
                    index = failure.event_index,
                    rule = %failure.rule,
                    "invariant violated"
                );
                failures.push(failure);
            }
        }
    }

    SoakReport {
        seeds: seeds.len() as u32,
        events_per_seed,
        runs,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use snake_core::verify_tape;

    use super::*;
    use crate::script::parse_script;

    #[test]
    fn run_reports_final_state_and_frames() {
        let events = parse_script("r t d*8 t*4").unwrap();
        let artifact = run_events(1, &events, false);
        let summary = &artifact.summary;
        assert_eq!(summary.events, 14);
        assert!(!summary.exited);
        assert_eq!(summary.state.mode, Mode::Playing);
        assert_eq!(summary.state.ticks, 5);
        // menu frame still in flight at the first tick; the second frame is
        // composed on tick 2 after the flush
        assert_eq!(summary.frames_started, 2);
        assert_eq!(summary.frames_completed, 1);
        assert_eq!(summary.pages_sent, 9);
        assert!(artifact.screen.contains('#'));
    }

    #[test]
    fn run_stops_at_exit() {
        let events = parse_script("t l t t").unwrap();
        let artifact = run_events(1, &events, false);
        assert!(artifact.summary.exited);
        assert_eq!(artifact.summary.events, 2);
    }

    #[test]
    fn recorded_tape_verifies_and_drops_events_after_exit() {
        // dies on tick 125, waits out the corpse, back to menu, exit
        let events = parse_script("r t*300 b l t*3").unwrap();
        let tape = record_tape(0xFEED, &events);
        let journal = verify_tape(&tape, 10_000).unwrap();
        assert!(journal.exited);
        assert_eq!(journal.event_count as usize, events.len() - 3);
        assert_eq!(journal.final_ticks, 125);
    }

    #[test]
    fn soak_finds_no_violations() {
        let seeds: Vec<u32> = (1..=8).collect();
        let report = soak(&seeds, 5_000);
        report.ensure_clean().unwrap();
        assert_eq!(report.runs.len(), 8);
        assert!(report.runs.iter().any(|run| run.games_started > 0));
    }

    #[test]
    fn soak_report_failure_message_names_first_seed() {
        let report = SoakReport {
            seeds: 2,
            events_per_seed: 10,
            runs: Vec::new(),
            failures: vec![SoakFailure {
                seed: seed_to_hex(7),
                event_index: 3,
                rule: "COIN_ON_SNAKE".to_string(),
            }],
        };
        let err = report.ensure_clean().unwrap_err().to_string();
        assert!(err.contains("0x00000007"), "{err}");
        assert!(err.contains("COIN_ON_SNAKE"), "{err}");
    }
}
