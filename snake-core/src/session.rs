use crate::render::{self, Renderer, Transmitter};
use crate::rng::ByteSource;
use crate::sim::Game;
use crate::types::{ButtonEvent, Control, Event};

/// The single owned context of a running game: simulation plus display.
/// Every host event goes through one of the `on_*` handlers and runs to
/// completion.
#[derive(Clone, Debug)]
pub struct Session<R, T: Transmitter> {
    game: Game<R>,
    renderer: Renderer<T>,
}

impl<R: ByteSource, T: Transmitter> Session<R, T> {
    /// Starts in the menu and composes the first frame.
    pub fn new(rng: R, transmitter: T) -> Self {
        let mut session = Self {
            game: Game::new(rng),
            renderer: Renderer::new(transmitter),
        };
        session.render();
        session
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn renderer(&self) -> &Renderer<T> {
        &self.renderer
    }

    /// One 20 ms timer tick: the simulation always advances, a frame is
    /// composed only if the previous one has been fully transmitted.
    pub fn on_timer(&mut self) -> bool {
        self.game.tick();
        self.render()
    }

    pub fn on_button(&mut self, button: ButtonEvent) -> Control {
        self.game.on_button(button)
    }

    /// Returns `true` when the notification finished the frame in flight.
    pub fn on_display_processed(&mut self) -> bool {
        self.renderer.on_chunk_processed()
    }

    pub fn handle(&mut self, event: Event) -> Control {
        match event {
            Event::Tick => {
                self.on_timer();
            }
            Event::Button(button) => return self.on_button(button),
            Event::DisplayProcessed => {
                self.on_display_processed();
            }
        }
        Control::Continue
    }

    fn render(&mut self) -> bool {
        let game = &self.game;
        self.renderer.compose(|frame| render::draw(game, frame))
    }
}
