use crate::constants::{
    COIN_MAX_X, COIN_MAX_Y, COIN_MIN_X, COIN_MIN_Y, MAX_COINS, SCREEN_HEIGHT, SCREEN_WIDTH,
    SPAWN_ATTEMPTS,
};
use crate::rng::ByteSource;
use crate::types::Position;

use super::snake::Snake;

const INTERIOR_WIDTH: u16 = (COIN_MAX_X - COIN_MIN_X + 1) as u16;
const INTERIOR_CELLS: u16 = INTERIOR_WIDTH * (COIN_MAX_Y - COIN_MIN_Y + 1) as u16;

/// Active coins, unordered, at most `MAX_COINS`.
#[derive(Clone, Debug)]
pub struct CoinSet {
    coins: [Position; MAX_COINS],
    count: u8,
}

impl Default for CoinSet {
    fn default() -> Self {
        Self {
            coins: [Position::default(); MAX_COINS],
            count: 0,
        }
    }
}

#[inline]
fn in_interior(pos: Position) -> bool {
    (COIN_MIN_X..=COIN_MAX_X).contains(&pos.x) && (COIN_MIN_Y..=COIN_MAX_Y).contains(&pos.y)
}

impl CoinSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.count as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == MAX_COINS
    }

    #[inline]
    pub fn as_slice(&self) -> &[Position] {
        &self.coins[..self.len()]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.as_slice().iter()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.iter().any(|coin| *coin == pos)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub(crate) fn push(&mut self, pos: Position) {
        debug_assert!(!self.is_full(), "coin set overflow");
        if !self.is_full() {
            self.coins[self.len()] = pos;
            self.count += 1;
        }
    }

    #[inline]
    fn is_free(&self, pos: Position, snake: &Snake) -> bool {
        in_interior(pos) && !snake.intersects(pos) && !self.contains(pos)
    }

    /// Places one coin inside the margin, off the snake and off every other
    /// coin. Sampling is bounded; after `SPAWN_ATTEMPTS` misses the interior
    /// is scanned row-major from the last candidate, so a free cell is found
    /// whatever bytes the source produces.
    pub fn spawn<R: ByteSource>(&mut self, rng: &mut R, snake: &Snake) -> Option<Position> {
        if self.is_full() {
            return None;
        }

        let mut candidate = Position::default();
        for _ in 0..SPAWN_ATTEMPTS {
            candidate = Position::new(
                rng.next_byte() & (SCREEN_WIDTH - 1),
                rng.next_byte() & (SCREEN_HEIGHT - 1),
            );
            if self.is_free(candidate, snake) {
                self.push(candidate);
                return Some(candidate);
            }
        }

        let clamped = Position::new(
            candidate.x.clamp(COIN_MIN_X, COIN_MAX_X),
            candidate.y.clamp(COIN_MIN_Y, COIN_MAX_Y),
        );
        let start =
            (clamped.y - COIN_MIN_Y) as u16 * INTERIOR_WIDTH + (clamped.x - COIN_MIN_X) as u16;
        let found = (0..INTERIOR_CELLS)
            .map(|i| {
                let cell = (start + i) % INTERIOR_CELLS;
                Position::new(
                    COIN_MIN_X + (cell % INTERIOR_WIDTH) as u8,
                    COIN_MIN_Y + (cell / INTERIOR_WIDTH) as u8,
                )
            })
            .find(|pos| self.is_free(*pos, snake))?;
        self.push(found);
        Some(found)
    }

    /// Per-tick spawn policy: an empty board always gets a coin; otherwise a
    /// non-full board gets one on even ticks with probability 1/256. The
    /// random byte is only drawn once the cheaper gates pass.
    pub fn tick_spawn<R: ByteSource>(
        &mut self,
        tick: u32,
        rng: &mut R,
        snake: &Snake,
    ) -> Option<Position> {
        let roll = self.is_empty() || (!self.is_full() && tick % 2 == 0 && rng.next_byte() == 0);
        if roll {
            self.spawn(rng, snake)
        } else {
            None
        }
    }

    /// Removes every coin the snake overlaps, keeping the survivors in order.
    /// Returns how many were removed.
    pub fn consume_if_intersecting(&mut self, snake: &Snake) -> u8 {
        let mut write_idx = 0;
        for read_idx in 0..self.len() {
            let coin = self.coins[read_idx];
            if !snake.intersects(coin) {
                if write_idx != read_idx {
                    self.coins[write_idx] = coin;
                }
                write_idx += 1;
            }
        }
        let eaten = self.count - write_idx as u8;
        self.count = write_idx as u8;
        eaten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;
    use crate::types::Direction;

    /// Replays a fixed byte script, then repeats the last byte forever.
    struct Script<'a> {
        bytes: &'a [u8],
        pos: usize,
    }

    impl ByteSource for Script<'_> {
        fn next_byte(&mut self) -> u8 {
            let byte = self.bytes[self.pos.min(self.bytes.len() - 1)];
            self.pos += 1;
            byte
        }
    }

    #[test]
    fn spawn_takes_first_free_sample() {
        let mut coins = CoinSet::default();
        let snake = Snake::new();
        // (2, 10) sits in the margin, (64, 24) on the snake head, (40, 9) is free.
        let mut rng = Script {
            bytes: &[2, 10, 64, 24, 40, 9],
            pos: 0,
        };
        assert_eq!(coins.spawn(&mut rng, &snake), Some(Position::new(40, 9)));
        assert_eq!(coins.len(), 1);
    }

    #[test]
    fn spawn_masks_bytes_into_grid() {
        let mut coins = CoinSet::default();
        let snake = Snake::new();
        let mut rng = Script {
            bytes: &[0x80 | 50, 0xE0 | 12],
            pos: 0,
        };
        assert_eq!(coins.spawn(&mut rng, &snake), Some(Position::new(50, 12)));
    }

    #[test]
    fn degenerate_source_still_spawns() {
        let snake = Snake::new();
        for byte in [0u8, 0xFF, 3, 64] {
            let mut coins = CoinSet::default();
            let mut rng = Script {
                bytes: &[byte],
                pos: 0,
            };
            let pos = coins.spawn(&mut rng, &snake).expect("spawn must succeed");
            assert!(in_interior(pos));
            assert!(!snake.intersects(pos));
        }
    }

    #[test]
    fn spawned_coins_stay_in_interior_off_snake_and_distinct() {
        let snake = Snake::new();
        let mut rng = SeededRng::new(0x5EED);
        for _ in 0..200 {
            let mut coins = CoinSet::default();
            while coins.spawn(&mut rng, &snake).is_some() {}
            assert!(coins.is_full());
            let all: alloc::vec::Vec<Position> = coins.iter().copied().collect();
            for (i, a) in all.iter().enumerate() {
                assert!(in_interior(*a), "{a:?} inside margin");
                assert!(!snake.intersects(*a));
                assert!(all[i + 1..].iter().all(|b| b != a), "duplicate coin {a:?}");
            }
        }
    }

    #[test]
    fn spawn_refuses_when_full() {
        let snake = Snake::new();
        let mut coins = CoinSet::default();
        let mut rng = SeededRng::new(1);
        for _ in 0..MAX_COINS {
            assert!(coins.spawn(&mut rng, &snake).is_some());
        }
        assert_eq!(coins.spawn(&mut rng, &snake), None);
        assert_eq!(coins.len(), MAX_COINS);
    }

    #[test]
    fn empty_board_always_spawns_on_any_tick() {
        let snake = Snake::new();
        for tick in [1u32, 2, 3, 999] {
            let mut coins = CoinSet::default();
            let mut rng = Script {
                bytes: &[0xAB],
                pos: 0,
            };
            assert!(coins.tick_spawn(tick, &mut rng, &snake).is_some());
        }
    }

    #[test]
    fn extra_spawn_needs_even_tick_and_zero_roll() {
        let snake = Snake::new();
        let mut coins = CoinSet::default();
        coins.push(Position::new(10, 10));

        let mut rng = Script {
            bytes: &[0, 30, 12],
            pos: 0,
        };
        assert_eq!(coins.tick_spawn(3, &mut rng, &snake), None);
        assert_eq!(rng.pos, 0, "odd tick must not draw a byte");

        let mut rng = Script {
            bytes: &[1, 30, 12],
            pos: 0,
        };
        assert_eq!(coins.tick_spawn(4, &mut rng, &snake), None);
        assert_eq!(rng.pos, 1);

        let mut rng = Script {
            bytes: &[0, 30, 12],
            pos: 0,
        };
        assert_eq!(
            coins.tick_spawn(4, &mut rng, &snake),
            Some(Position::new(30, 12))
        );
        assert_eq!(coins.len(), 2);
    }

    #[test]
    fn consume_removes_every_overlap_in_order() {
        let snake = Snake::from_segments(
            &[
                Position::new(20, 10),
                Position::new(20, 11),
                Position::new(20, 12),
            ],
            Direction::Up,
        );
        let mut coins = CoinSet::default();
        for pos in [
            Position::new(20, 10),
            Position::new(20, 11),
            Position::new(30, 10),
            Position::new(20, 12),
            Position::new(40, 10),
        ] {
            coins.push(pos);
        }

        assert_eq!(coins.consume_if_intersecting(&snake), 3);
        let left: alloc::vec::Vec<Position> = coins.iter().copied().collect();
        assert_eq!(left, [Position::new(30, 10), Position::new(40, 10)]);
        assert_eq!(coins.consume_if_intersecting(&snake), 0);
    }
}
