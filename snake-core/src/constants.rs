// Display geometry (fixed 128x32 monochrome panel)
pub const SCREEN_WIDTH: u8 = 128;
pub const SCREEN_HEIGHT: u8 = 32;
pub const FRAME_BYTES: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8;

// Timing
pub const TICK_INTERVAL_MS: u32 = 20;
pub const DEATH_WAIT: u8 = 150; // ticks; must fit in u8

// Snake
pub const MAX_SNAKE_LEN: usize = 60;
pub const MAX_SPEED: u8 = 5;
pub const START_LEN: usize = 7;
pub const START_HEAD_X: u8 = 64;
pub const START_HEAD_Y: u8 = 24;
pub const SPEED_UP_PENALTY: i8 = 5;

/// Length at which eating a coin buys a speed level instead of a segment,
/// indexed by `speed_level - 1`.
pub const GROWTH_LIMITS: [u16; MAX_SPEED as usize] = [20, 30, 40, 50, MAX_SNAKE_LEN as u16];

// Coins
pub const MAX_COINS: usize = 5;
pub const COIN_MARGIN: u8 = 4;
pub const COIN_MIN_X: u8 = COIN_MARGIN;
pub const COIN_MAX_X: u8 = SCREEN_WIDTH - COIN_MARGIN - 1; // 123
pub const COIN_MIN_Y: u8 = COIN_MARGIN;
pub const COIN_MAX_Y: u8 = SCREEN_HEIGHT - COIN_MARGIN - 1; // 27
pub const SPAWN_ATTEMPTS: u32 = 64;

// Session tape format
pub const TAPE_MAGIC: u32 = 0x544B_4E53; // "SNKT"
pub const TAPE_VERSION: u8 = 1;
pub const TAPE_HEADER_SIZE: usize = 16;
pub const TAPE_FOOTER_SIZE: usize = 16;
pub const MAX_EVENTS_DEFAULT: u32 = 1_000_000;
