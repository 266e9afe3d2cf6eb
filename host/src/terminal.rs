use snake_core::constants::{FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};
use snake_core::render::{ChunkSink, FrameBuffer, PAGE_BYTES, PAGE_COUNT, ROW_BYTES};

/// Reassembles pages into whole frames, standing in for the panel driver.
/// With `echo` set every completed frame is printed to stdout.
#[derive(Clone, Debug)]
pub struct TerminalSink {
    bytes: [u8; FRAME_BYTES],
    frames: u32,
    echo: bool,
}

impl TerminalSink {
    pub fn new(echo: bool) -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
            frames: 0,
            echo,
        }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Last frame the panel would show.
    pub fn screen(&self) -> String {
        render_ascii(&self.bytes)
    }
}

impl ChunkSink for TerminalSink {
    fn send(&mut self, page: u8, bytes: &[u8]) {
        let start = page as usize * PAGE_BYTES;
        let Some(slot) = self.bytes.get_mut(start..start + bytes.len()) else {
            tracing::warn!(page, len = bytes.len(), "page outside frame dropped");
            return;
        };
        slot.copy_from_slice(bytes);

        if page + 1 == PAGE_COUNT {
            self.frames += 1;
            tracing::trace!(frame = self.frames, "frame received");
            if self.echo {
                println!("frame {}\n{}", self.frames, self.screen());
            }
        }
    }
}

/// One text line per pixel row, `#` for lit pixels, inside a border.
pub fn render_ascii(bytes: &[u8; FRAME_BYTES]) -> String {
    let width = SCREEN_WIDTH as usize;
    let border = format!("+{}+", "-".repeat(width));
    let mut out = String::with_capacity((width + 3) * (SCREEN_HEIGHT as usize + 2));
    out.push_str(&border);
    out.push('\n');

    for row in bytes.chunks(ROW_BYTES) {
        out.push('|');
        for x in 0..width {
            let lit = row[x / 8] & (0x80 >> (x % 8)) != 0;
            out.push(if lit { '#' } else { ' ' });
        }
        out.push_str("|\n");
    }

    out.push_str(&border);
    out
}

pub fn frame_to_ascii(frame: &FrameBuffer) -> String {
    render_ascii(frame.as_bytes())
}
