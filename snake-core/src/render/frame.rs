use super::canvas::Canvas;
use crate::constants::{FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const ROW_BYTES: usize = SCREEN_WIDTH as usize / 8;
pub const PAGE_ROWS: usize = 4;
pub const PAGE_BYTES: usize = ROW_BYTES * PAGE_ROWS;
pub const PAGE_COUNT: u8 = (SCREEN_HEIGHT as usize / PAGE_ROWS) as u8;

/// Bit-packed 128x32 monochrome frame, row-major, MSB-first.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; FRAME_BYTES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
        }
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("lit", &self.lit_pixels())
            .finish()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn index(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH as i32 || y >= SCREEN_HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * ROW_BYTES + x / 8, 0x80 >> (x % 8)))
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).is_some_and(|(byte, mask)| self.bytes[byte] & mask != 0)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    /// Rows `4 * page .. 4 * page + 4` as they go over the wire.
    pub fn page(&self, page: u8) -> &[u8] {
        let start = (page as usize).min(PAGE_COUNT as usize) * PAGE_BYTES;
        let end = (start + PAGE_BYTES).min(FRAME_BYTES);
        &self.bytes[start..end]
    }

    pub fn lit_pixels(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }
}

impl Canvas for FrameBuffer {
    fn clear(&mut self) {
        self.bytes.fill(0);
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((byte, mask)) = Self::index(x, y) {
            if on {
                self.bytes[byte] |= mask;
            } else {
                self.bytes[byte] &= !mask;
            }
        }
    }
}
