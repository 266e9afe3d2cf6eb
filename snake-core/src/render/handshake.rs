use core::fmt;

use super::canvas::Canvas;
use super::frame::{FrameBuffer, PAGE_COUNT};

/// Result of a transmission step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transmission<M> {
    Pending(M),
    Complete,
}

/// Moves a composed frame to the physical display, one chunk per call. The
/// marker is opaque to the renderer; it only hands it back on the next
/// `advance`.
pub trait Transmitter {
    type Marker: Copy + fmt::Debug;

    fn begin(&mut self, frame: &FrameBuffer) -> Transmission<Self::Marker>;

    fn advance(&mut self, frame: &FrameBuffer, marker: Self::Marker)
        -> Transmission<Self::Marker>;
}

/// Receiver of frame pages.
pub trait ChunkSink {
    fn send(&mut self, page: u8, bytes: &[u8]);
}

/// Discards every page.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ChunkSink for NullSink {
    fn send(&mut self, _page: u8, _bytes: &[u8]) {}
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn send(&mut self, page: u8, bytes: &[u8]) {
        (**self).send(page, bytes)
    }
}

/// Streams a frame as eight 4-row pages. The marker is the next page to
/// send; a notification after the last page completes the frame.
#[derive(Clone, Debug, Default)]
pub struct PagedTransmitter<S> {
    sink: S,
    pages_sent: u64,
}

impl<S: ChunkSink> PagedTransmitter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            pages_sent: 0,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn pages_sent(&self) -> u64 {
        self.pages_sent
    }

    fn send_page(&mut self, frame: &FrameBuffer, page: u8) -> Transmission<u8> {
        self.sink.send(page, frame.page(page));
        self.pages_sent += 1;
        Transmission::Pending(page + 1)
    }
}

impl<S: ChunkSink> Transmitter for PagedTransmitter<S> {
    type Marker = u8;

    fn begin(&mut self, frame: &FrameBuffer) -> Transmission<u8> {
        self.send_page(frame, 0)
    }

    fn advance(&mut self, frame: &FrameBuffer, next: u8) -> Transmission<u8> {
        if next >= PAGE_COUNT {
            Transmission::Complete
        } else {
            self.send_page(frame, next)
        }
    }
}

/// At most one frame in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderHandshake<M> {
    Idle,
    InProgress(M),
}

impl<M> RenderHandshake<M> {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Owns the frame buffer and drives the handshake against a transmitter.
/// The buffer is only written while the handshake is idle.
#[derive(Clone, Debug)]
pub struct Renderer<T: Transmitter> {
    frame: FrameBuffer,
    state: RenderHandshake<T::Marker>,
    transmitter: T,
    frames_started: u32,
    frames_completed: u32,
}

impl<T: Transmitter> Renderer<T> {
    pub fn new(transmitter: T) -> Self {
        Self {
            frame: FrameBuffer::new(),
            state: RenderHandshake::Idle,
            transmitter,
            frames_started: 0,
            frames_completed: 0,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn state(&self) -> RenderHandshake<T::Marker> {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    pub fn frames_started(&self) -> u32 {
        self.frames_started
    }

    pub fn frames_completed(&self) -> u32 {
        self.frames_completed
    }

    /// Clears the buffer, lets `draw` fill it and starts sending it. Returns
    /// `false` without touching the buffer while a frame is in flight.
    pub fn compose(&mut self, draw: impl FnOnce(&mut FrameBuffer)) -> bool {
        if let RenderHandshake::InProgress(marker) = self.state {
            tracing::trace!(?marker, "frame skipped, previous still in flight");
            return false;
        }

        self.frame.clear();
        draw(&mut self.frame);
        self.frames_started = self.frames_started.wrapping_add(1);
        match self.transmitter.begin(&self.frame) {
            Transmission::Pending(marker) => self.state = RenderHandshake::InProgress(marker),
            Transmission::Complete => self.finish(),
        }
        tracing::trace!(
            frame = self.frames_started,
            lit = self.frame.lit_pixels(),
            "frame composed"
        );
        true
    }

    /// Handles a "chunk processed" notification. Returns `true` when this
    /// notification completed the frame.
    pub fn on_chunk_processed(&mut self) -> bool {
        let RenderHandshake::InProgress(marker) = self.state else {
            return false;
        };
        match self.transmitter.advance(&self.frame, marker) {
            Transmission::Pending(next) => {
                self.state = RenderHandshake::InProgress(next);
                false
            }
            Transmission::Complete => {
                self.finish();
                true
            }
        }
    }

    fn finish(&mut self) {
        self.state = RenderHandshake::Idle;
        self.frames_completed = self.frames_completed.wrapping_add(1);
    }
}
