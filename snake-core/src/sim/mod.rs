use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::constants::{
    COIN_MAX_X, COIN_MAX_Y, COIN_MIN_X, COIN_MIN_Y, DEATH_WAIT, MAX_COINS, MAX_SNAKE_LEN,
    MAX_SPEED,
};
use crate::error::RuleCode;
use crate::rng::ByteSource;
use crate::types::{ButtonEvent, Control, Direction, Mode, Position, Turn};

mod clock;
mod coins;
mod game;
mod snake;

pub use clock::GameClock;
pub use coins::CoinSet;
pub use game::Game;
pub use snake::{EatOutcome, Snake, StepOutcome};

/// Compact per-event state sample used for replay fingerprints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub mode: u8,
    pub dead_tick: u8,
    pub ticks: u32,
    pub head: Position,
    pub direction: Direction,
    pub length: u8,
    pub speed: u8,
    pub growth_debt: i8,
    pub coins: u8,
}

/// Full read-only view of the game, for hosts and tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub mode: Mode,
    pub ticks: u32,
    pub elapsed_ms: u64,
    pub direction: Direction,
    pub turn_cooldown: bool,
    pub speed: u8,
    pub growth_debt: i8,
    pub target_length: i32,
    pub snake: Vec<Position>,
    pub coins: Vec<Position>,
}
