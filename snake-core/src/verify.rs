use serde::{Deserialize, Serialize};

use crate::error::VerifyError;
use crate::replay::{replay_strict, ReplayResult, ReplayViolation};
use crate::tape::parse_tape;
use crate::types::Event;

/// What a successfully verified tape proves about the session it recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionJournal {
    pub seed: u32,
    pub event_count: u32,
    pub final_length: u32,
    pub final_ticks: u32,
    pub elapsed_ms: u64,
    pub final_rng_state: u32,
    pub frames_completed: u32,
    pub exited: bool,
    pub tape_checksum: u32,
}

pub fn verify_tape(bytes: &[u8], max_events: u32) -> Result<SessionJournal, VerifyError> {
    verify_tape_with_replay(bytes, max_events, replay_strict)
}

fn verify_tape_with_replay<F>(
    bytes: &[u8],
    max_events: u32,
    replay_fn: F,
) -> Result<SessionJournal, VerifyError>
where
    F: FnOnce(u32, &[Event]) -> Result<ReplayResult, ReplayViolation>,
{
    let tape = parse_tape(bytes, max_events)?;
    let result = replay_fn(tape.header.seed, tape.events.as_slice()).map_err(|err| {
        VerifyError::RuleViolation {
            index: err.index,
            rule: err.rule,
        }
    })?;

    if result.event_count != tape.header.event_count {
        return Err(VerifyError::EventCountMismatch {
            claimed: tape.header.event_count,
            computed: result.event_count,
        });
    }
    if result.final_length != tape.footer.final_length {
        return Err(VerifyError::LengthMismatch {
            claimed: tape.footer.final_length,
            computed: result.final_length,
        });
    }
    if result.final_ticks != tape.footer.final_ticks {
        return Err(VerifyError::TicksMismatch {
            claimed: tape.footer.final_ticks,
            computed: result.final_ticks,
        });
    }
    if result.final_rng_state != tape.footer.final_rng_state {
        return Err(VerifyError::RngMismatch {
            claimed: tape.footer.final_rng_state,
            computed: result.final_rng_state,
        });
    }

    tracing::debug!(
        seed = tape.header.seed,
        events = result.event_count,
        length = result.final_length,
        "tape verified"
    );

    Ok(SessionJournal {
        seed: tape.header.seed,
        event_count: result.event_count,
        final_length: result.final_length,
        final_ticks: result.final_ticks,
        elapsed_ms: result.final_ticks as u64 * crate::constants::TICK_INTERVAL_MS as u64,
        final_rng_state: result.final_rng_state,
        frames_completed: result.frames_completed,
        exited: result.exited,
        tape_checksum: tape.footer.checksum,
    })
}
