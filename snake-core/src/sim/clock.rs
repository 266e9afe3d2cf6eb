use crate::constants::TICK_INTERVAL_MS;

/// Ticks elapsed in the current play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameClock {
    ticks: u32,
}

impl GameClock {
    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    #[inline]
    pub fn advance(&mut self) -> u32 {
        self.ticks = self.ticks.wrapping_add(1);
        self.ticks
    }

    #[inline]
    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    /// True on ticks where a snake moving every `period` ticks takes a step.
    #[inline]
    pub fn is_step_tick(&self, period: u32) -> bool {
        self.ticks % period == 0
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.ticks as u64 * TICK_INTERVAL_MS as u64
    }
}
