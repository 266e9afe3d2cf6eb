use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::error::RuleCode;
use crate::render::{NullSink, PagedTransmitter};
use crate::rng::SeededRng;
use crate::session::Session;
use crate::sim::Checkpoint;
use crate::types::{Control, Event};

pub type HeadlessSession = Session<SeededRng, PagedTransmitter<NullSink>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayResult {
    /// Snake length once the outstanding growth debt settles.
    pub final_length: u32,
    pub final_ticks: u32,
    pub final_rng_state: u32,
    /// Events consumed; stops short of the input when the session exits.
    pub event_count: u32,
    pub frames_completed: u32,
    pub exited: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayViolation {
    pub index: u32,
    pub rule: RuleCode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayCheckpoint {
    pub event_count: u32,
    pub rng_state: u32,
    pub state: Checkpoint,
}

pub fn headless_session(seed: u32) -> HeadlessSession {
    Session::new(SeededRng::new(seed), PagedTransmitter::new(NullSink))
}

fn result(session: &HeadlessSession, event_count: u32, exited: bool) -> ReplayResult {
    let game = session.game();
    ReplayResult {
        final_length: game.snake().target_length().max(0) as u32,
        final_ticks: game.clock().ticks(),
        final_rng_state: game.rng().state(),
        event_count,
        frames_completed: session.renderer().frames_completed(),
        exited,
    }
}

fn checkpoint(session: &HeadlessSession, event_count: u32) -> ReplayCheckpoint {
    ReplayCheckpoint {
        event_count,
        rng_state: session.game().rng().state(),
        state: session.game().checkpoint(),
    }
}

pub fn replay(seed: u32, events: &[Event]) -> ReplayResult {
    let mut session = headless_session(seed);
    let mut consumed = 0u32;

    for event in events {
        consumed += 1;
        if session.handle(*event) == Control::Exit {
            return result(&session, consumed, true);
        }
    }

    result(&session, consumed, false)
}

/// Like [`replay`], but checks the engine invariants after every event and
/// reports the first event that broke one.
pub fn replay_strict(seed: u32, events: &[Event]) -> Result<ReplayResult, ReplayViolation> {
    let mut session = headless_session(seed);
    session
        .game()
        .validate_invariants()
        .map_err(|rule| ReplayViolation { index: 0, rule })?;

    for (index, event) in events.iter().enumerate() {
        let control = session.handle(*event);
        session
            .game()
            .validate_invariants()
            .map_err(|rule| ReplayViolation {
                index: index as u32,
                rule,
            })?;
        if control == Control::Exit {
            return Ok(result(&session, index as u32 + 1, true));
        }
    }

    Ok(result(&session, events.len() as u32, false))
}

/// Initial state plus one sample every `sample_every` events and after the
/// last one.
pub fn replay_with_checkpoints(
    seed: u32,
    events: &[Event],
    sample_every: u32,
) -> Vec<ReplayCheckpoint> {
    let mut session = headless_session(seed);
    let stride = if sample_every == 0 { 1 } else { sample_every };
    let total = events.len() as u32;
    let mut checkpoints = Vec::new();
    checkpoints.push(checkpoint(&session, 0));

    for (index, event) in events.iter().enumerate() {
        let control = session.handle(*event);
        let count = (index + 1) as u32;
        if count % stride == 0 || count == total || control == Control::Exit {
            checkpoints.push(checkpoint(&session, count));
        }
        if control == Control::Exit {
            break;
        }
    }

    checkpoints
}
