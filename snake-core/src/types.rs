use serde::{Deserialize, Serialize};

use crate::constants::{DEATH_WAIT, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Cell on the 128x32 grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        self.x < SCREEN_WIDTH && self.y < SCREEN_HEIGHT
    }

    /// Neighbouring cell in `direction`, or `None` when the step would leave
    /// the grid.
    #[inline]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let Self { x, y } = self;
        match direction {
            Direction::Up => y.checked_sub(1).map(|y| Self { x, y }),
            Direction::Right => (x + 1 < SCREEN_WIDTH).then(|| Self { x: x + 1, y }),
            Direction::Down => (y + 1 < SCREEN_HEIGHT).then(|| Self { x, y: y + 1 }),
            Direction::Left => x.checked_sub(1).map(|x| Self { x, y }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn rotate(self, turn: Turn) -> Self {
        match (turn, self) {
            (Turn::Left, Self::Up) => Self::Left,
            (Turn::Left, Self::Right) => Self::Up,
            (Turn::Left, Self::Down) => Self::Right,
            (Turn::Left, Self::Left) => Self::Down,
            (Turn::Right, Self::Up) => Self::Right,
            (Turn::Right, Self::Right) => Self::Down,
            (Turn::Right, Self::Down) => Self::Left,
            (Turn::Right, Self::Left) => Self::Up,
        }
    }
}

/// Rotation applied by a single accepted turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

pub const BUTTON_LEFT: u32 = 0x01;
pub const BUTTON_RIGHT: u32 = 0x02;
pub const BUTTON_EVT_RELEASED: u32 = 0x8000_0000;

/// Button release delivered by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonEvent {
    Left,
    Right,
    Both,
}

impl ButtonEvent {
    /// Decodes a raw button mask. Presses, holds and unknown masks yield no
    /// event.
    pub fn from_mask(mask: u32) -> Option<Self> {
        match mask {
            m if m == BUTTON_EVT_RELEASED | BUTTON_LEFT | BUTTON_RIGHT => Some(Self::Both),
            m if m == BUTTON_EVT_RELEASED | BUTTON_LEFT => Some(Self::Left),
            m if m == BUTTON_EVT_RELEASED | BUTTON_RIGHT => Some(Self::Right),
            _ => None,
        }
    }
}

/// Anything the hosting environment can deliver to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Tick,
    Button(ButtonEvent),
    DisplayProcessed,
}

impl Event {
    pub const fn code(self) -> u8 {
        match self {
            Self::Tick => 0,
            Self::Button(ButtonEvent::Left) => 1,
            Self::Button(ButtonEvent::Right) => 2,
            Self::Button(ButtonEvent::Both) => 3,
            Self::DisplayProcessed => 4,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Tick),
            1 => Some(Self::Button(ButtonEvent::Left)),
            2 => Some(Self::Button(ButtonEvent::Right)),
            3 => Some(Self::Button(ButtonEvent::Both)),
            4 => Some(Self::DisplayProcessed),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Menu,
    Playing,
    Paused,
    Dead { dead_tick: u8 },
}

impl Mode {
    /// Dead mode has shown the corpse for the full wait and accepts input.
    pub fn death_wait_elapsed(self) -> bool {
        matches!(self, Self::Dead { dead_tick } if dead_tick == DEATH_WAIT)
    }
}

/// What the host should do after an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}
