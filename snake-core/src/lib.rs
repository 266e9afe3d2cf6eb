//! Fixed-capacity snake game engine for a 128x32 monochrome panel.
//!
//! The simulation (`sim`) is allocation-free; `render` composes frames and
//! streams them under a one-frame-in-flight handshake; `session` ties both
//! to host events. Tapes record a session so it can be replayed and
//! verified elsewhere.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod constants;
pub mod error;
pub mod render;
pub mod replay;
pub mod rng;
pub mod session;
pub mod sim;
pub mod tape;
pub mod types;
pub mod verify;

pub use error::{RuleCode, VerifyError};
pub use replay::{replay, replay_strict, replay_with_checkpoints, ReplayResult, ReplayViolation};
pub use session::Session;
pub use types::{ButtonEvent, Control, Direction, Event, Mode, Position};
pub use verify::{verify_tape, SessionJournal};
