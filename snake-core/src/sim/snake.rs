use core::cmp::Ordering;

use crate::constants::{
    GROWTH_LIMITS, MAX_SNAKE_LEN, MAX_SPEED, SPEED_UP_PENALTY, START_HEAD_X, START_HEAD_Y,
    START_LEN,
};
use crate::types::{Direction, Position, Turn};

/// Result of one movement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    HitWall,
    HitSelf,
}

impl StepOutcome {
    #[inline]
    pub fn is_fatal(self) -> bool {
        !matches!(self, Self::Moved)
    }
}

/// What eating one coin did to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EatOutcome {
    Grew,
    SpedUp,
    Saturated,
}

/// Snake body stored in a fixed ring. Logical index 0 is the head; `offset`
/// is the physical slot of the head, so prepending moves `offset` back one
/// slot and dropping the tail only shortens `len`.
#[derive(Clone, Debug)]
pub struct Snake {
    body: [Position; MAX_SNAKE_LEN],
    offset: usize,
    len: usize,
    direction: Direction,
    turn_cooldown: bool,
    speed: u8,
    growth_debt: i8,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Snake {
    /// Starting snake: vertical, head at (64, 24), heading up.
    pub fn new() -> Self {
        let mut snake = Self {
            body: [Position::default(); MAX_SNAKE_LEN],
            offset: 0,
            len: START_LEN,
            direction: Direction::Up,
            turn_cooldown: false,
            speed: 1,
            growth_debt: 0,
        };
        for n in 0..START_LEN {
            snake.set(n, Position::new(START_HEAD_X, START_HEAD_Y + n as u8));
        }
        snake
    }

    /// Builds a snake from explicit segments, head first.
    #[cfg(test)]
    pub(crate) fn from_segments(segments: &[Position], direction: Direction) -> Self {
        assert!(
            !segments.is_empty() && segments.len() <= MAX_SNAKE_LEN,
            "snake must have 1..={MAX_SNAKE_LEN} segments"
        );
        let mut snake = Self {
            len: segments.len(),
            direction,
            ..Self::new()
        };
        for (n, pos) in segments.iter().enumerate() {
            snake.set(n, *pos);
        }
        snake
    }

    #[inline]
    fn slot(&self, n: usize) -> usize {
        (self.offset + n) % MAX_SNAKE_LEN
    }

    /// Segment `n` counted from the head. Callers keep `n < len()`.
    #[inline]
    pub fn get(&self, n: usize) -> Position {
        debug_assert!(n < self.len);
        self.body[self.slot(n)]
    }

    #[inline]
    pub fn set(&mut self, n: usize, pos: Position) {
        let slot = self.slot(n);
        self.body[slot] = pos;
    }

    #[inline]
    pub fn head(&self) -> Position {
        self.get(0)
    }

    pub fn prepend(&mut self, pos: Position) {
        debug_assert!(self.len < MAX_SNAKE_LEN, "snake ring overflow");
        self.offset = if self.offset == 0 {
            MAX_SNAKE_LEN - 1
        } else {
            self.offset - 1
        };
        self.len += 1;
        self.set(0, pos);
    }

    pub fn drop_tail(&mut self) {
        debug_assert!(self.len > 0, "snake ring underflow");
        self.len -= 1;
    }

    pub fn intersects(&self, pos: Position) -> bool {
        self.iter().any(|segment| segment == pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len).map(move |n| self.get(n))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn turn_cooldown(&self) -> bool {
        self.turn_cooldown
    }

    #[inline]
    pub fn speed(&self) -> u8 {
        self.speed
    }

    #[inline]
    pub fn growth_debt(&self) -> i8 {
        self.growth_debt
    }

    /// Length the snake converges to once its growth debt is settled.
    #[inline]
    pub fn target_length(&self) -> i32 {
        self.len as i32 + self.growth_debt as i32
    }

    /// Ticks between two movement steps at the current speed.
    #[inline]
    pub fn move_period(&self) -> u32 {
        (MAX_SPEED + 1 - self.speed) as u32
    }

    /// Physical slot of logical segment `n`.
    #[inline]
    pub fn physical_slot(&self, n: usize) -> usize {
        self.slot(n)
    }

    pub fn turn(&mut self, turn: Turn) -> bool {
        if self.turn_cooldown {
            return false;
        }
        self.direction = self.direction.rotate(turn);
        self.turn_cooldown = true;
        true
    }

    pub fn advance(&mut self) -> StepOutcome {
        let Some(head) = self.head().step(self.direction) else {
            return StepOutcome::HitWall;
        };
        if self.intersects(head) {
            return StepOutcome::HitSelf;
        }

        self.turn_cooldown = false;
        match self.growth_debt.cmp(&0) {
            Ordering::Equal => self.drop_tail(),
            Ordering::Greater => self.growth_debt -= 1,
            Ordering::Less => {
                self.drop_tail();
                self.drop_tail();
                self.growth_debt += 1;
            }
        }
        self.prepend(head);
        StepOutcome::Moved
    }

    pub fn eat_coin(&mut self) -> EatOutcome {
        let limit = GROWTH_LIMITS[(self.speed - 1) as usize] as i32;
        if self.target_length() < limit {
            self.growth_debt += 1;
            EatOutcome::Grew
        } else if self.speed < MAX_SPEED {
            self.speed += 1;
            self.growth_debt -= SPEED_UP_PENALTY;
            EatOutcome::SpedUp
        } else {
            EatOutcome::Saturated
        }
    }

    #[cfg(test)]
    pub(crate) fn set_progress(&mut self, speed: u8, growth_debt: i8) {
        self.speed = speed;
        self.growth_debt = growth_debt;
    }
}
