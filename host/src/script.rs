//! Text form of an event stream: whitespace-separated tokens, each with an
//! optional `*N` repeat suffix. `#` starts a comment running to end of line.
//!
//! ```text
//! r           # start
//! t*5 d*8     # one step, flush the frame
//! l t*5
//! ```

use anyhow::{anyhow, bail, Context, Result};
use snake_core::{ButtonEvent, Event};

const MAX_REPEAT: u32 = 1_000_000;

fn parse_event(name: &str) -> Option<Event> {
    match name.to_ascii_lowercase().as_str() {
        "t" | "tick" => Some(Event::Tick),
        "l" | "left" => Some(Event::Button(ButtonEvent::Left)),
        "r" | "right" => Some(Event::Button(ButtonEvent::Right)),
        "b" | "both" => Some(Event::Button(ButtonEvent::Both)),
        "d" | "done" => Some(Event::DisplayProcessed),
        _ => None,
    }
}

pub fn parse_script(text: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default();
        for token in line.split_whitespace() {
            let (name, repeat) = match token.split_once('*') {
                Some((name, count)) => {
                    let count = count.parse::<u32>().with_context(|| {
                        format!("line {}: invalid repeat count in `{token}`", line_no + 1)
                    })?;
                    if count == 0 || count > MAX_REPEAT {
                        bail!(
                            "line {}: repeat count in `{token}` must be 1..={MAX_REPEAT}",
                            line_no + 1
                        );
                    }
                    (name, count)
                }
                None => (token, 1),
            };
            let event = parse_event(name)
                .ok_or_else(|| anyhow!("line {}: unknown event `{name}`", line_no + 1))?;
            events.extend(std::iter::repeat(event).take(repeat as usize));
        }
    }

    if events.is_empty() {
        bail!("script contains no events");
    }
    Ok(events)
}
