use core::fmt;

/// Engine invariant that a replayed session broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    SnakeLengthRange,
    SnakeSpeedRange,
    SnakeBodyBounds,
    SnakeBodyOverlap,
    CoinCap,
    CoinDuplicate,
    CoinMargin,
    CoinOnSnake,
    DeadTickRange,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnakeLengthRange => write!(f, "SNAKE_LENGTH_RANGE"),
            Self::SnakeSpeedRange => write!(f, "SNAKE_SPEED_RANGE"),
            Self::SnakeBodyBounds => write!(f, "SNAKE_BODY_BOUNDS"),
            Self::SnakeBodyOverlap => write!(f, "SNAKE_BODY_OVERLAP"),
            Self::CoinCap => write!(f, "COIN_CAP"),
            Self::CoinDuplicate => write!(f, "COIN_DUPLICATE"),
            Self::CoinMargin => write!(f, "COIN_MARGIN"),
            Self::CoinOnSnake => write!(f, "COIN_ON_SNAKE"),
            Self::DeadTickRange => write!(f, "DEAD_TICK_RANGE"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyError {
    TapeTooShort { actual: usize, min: usize },
    InvalidMagic { found: u32 },
    UnsupportedVersion { found: u8 },
    HeaderReservedNonZero,
    EventCountOutOfRange { event_count: u32, max_events: u32 },
    TapeLengthMismatch { expected: usize, actual: usize },
    UnknownEventCode { index: u32, byte: u8 },
    CrcMismatch { stored: u32, computed: u32 },
    RuleViolation { index: u32, rule: RuleCode },
    EventCountMismatch { claimed: u32, computed: u32 },
    LengthMismatch { claimed: u32, computed: u32 },
    TicksMismatch { claimed: u32, computed: u32 },
    RngMismatch { claimed: u32, computed: u32 },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TapeTooShort { actual, min } => {
                write!(f, "tape too short: got {actual} bytes, need at least {min}")
            }
            Self::InvalidMagic { found } => write!(f, "invalid tape magic: 0x{found:08x}"),
            Self::UnsupportedVersion { found } => write!(f, "unsupported tape version: {found}"),
            Self::HeaderReservedNonZero => write!(f, "header reserved bytes are non-zero"),
            Self::EventCountOutOfRange {
                event_count,
                max_events,
            } => write!(
                f,
                "event count out of range: {event_count} (allowed 1..={max_events})"
            ),
            Self::TapeLengthMismatch { expected, actual } => write!(
                f,
                "tape length mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::UnknownEventCode { index, byte } => {
                write!(f, "unknown event code at index {index}: 0x{byte:02x}")
            }
            Self::CrcMismatch { stored, computed } => write!(
                f,
                "crc mismatch: stored=0x{stored:08x}, computed=0x{computed:08x}"
            ),
            Self::RuleViolation { index, rule } => {
                write!(f, "rule violation after event {index}: {rule}")
            }
            Self::EventCountMismatch { claimed, computed } => write!(
                f,
                "event count mismatch: tape holds {claimed}, session exited after {computed}"
            ),
            Self::LengthMismatch { claimed, computed } => {
                write!(f, "length mismatch: claimed={claimed}, computed={computed}")
            }
            Self::TicksMismatch { claimed, computed } => {
                write!(f, "tick mismatch: claimed={claimed}, computed={computed}")
            }
            Self::RngMismatch { claimed, computed } => {
                write!(
                    f,
                    "rng mismatch: claimed=0x{claimed:08x}, computed=0x{computed:08x}"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VerifyError {}
