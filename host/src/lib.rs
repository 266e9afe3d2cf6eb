pub mod config;
pub mod runner;
pub mod script;
pub mod terminal;
pub mod util;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use snake_core::Event;

pub use config::HostConfig;

pub fn read_tape(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read tape: {}", path.display()))
}

/// Events from an inline script, or from a script file when the argument
/// starts with `@`.
pub fn load_script(arg: &str) -> Result<Vec<Event>> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script file: {path}"))?,
        None => arg.to_string(),
    };
    script::parse_script(&text)
}
