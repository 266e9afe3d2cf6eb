use std::env;

use snake_core::constants::MAX_EVENTS_DEFAULT;

pub const SOAK_EVENTS_DEFAULT: u32 = 20_000;

/// Limits the CLI falls back to when a flag is not given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// Upper bound on the event count of a tape accepted by `verify`.
    pub max_events: u32,
    /// Events fed to each seed by `soak`.
    pub soak_events: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_events: MAX_EVENTS_DEFAULT,
            soak_events: SOAK_EVENTS_DEFAULT,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_events: read_env_u32("SNAKE_MAX_EVENTS", defaults.max_events),
            soak_events: read_env_u32("SNAKE_SOAK_EVENTS", defaults.soak_events),
        }
    }
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
