mod assets;
mod canvas;
mod frame;
mod handshake;
mod view;

pub use canvas::{Align, Bitmap, Canvas, Font, HAlign, VAlign, GLYPH_SIZE};
pub use frame::{FrameBuffer, PAGE_BYTES, PAGE_COUNT, PAGE_ROWS, ROW_BYTES};
pub use handshake::{
    ChunkSink, NullSink, PagedTransmitter, RenderHandshake, Renderer, Transmission, Transmitter,
};
pub use view::draw;
