//! Platform abstraction layer
//!
//! Everything between the game and the outside world:
//! - Time (`clock`)
//! - Input events and where they come from
//! - Presenting frames and game notifications
//! - The loop that ties it together (`game_loop`)

pub mod autoplay;
pub mod clock;
pub mod game_loop;

use glam::Vec2;

pub use autoplay::AutoPlayer;
pub use clock::{Clock, ManualClock, SystemClock};
pub use game_loop::{GameLoop, LoopSummary};

use crate::renderer::VertexBatch;
use crate::sim::{GameEvent, GameSession};

/// Raw window events the game understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse press at window coordinates
    Click(Vec2),
    /// Window close request
    Close,
}

/// Source of input events, polled once per frame
pub trait EventSource {
    fn poll(&mut self, session: &GameSession, dt: f32, out: &mut Vec<InputEvent>);
}

/// Receives finished frames and game notifications
pub trait Presenter {
    fn present(&mut self, frame: &VertexBatch);
    fn notify(&mut self, event: &GameEvent);
}

/// Headless presenter: reports game events to the log
#[derive(Debug, Default)]
pub struct LogPresenter {
    frames: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &VertexBatch) {
        self.frames += 1;
        log::trace!("frame {}: {} vertices", self.frames, frame.vertices().len());
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SignalPlayed { signal } => log::debug!("Showing {}", signal),
            GameEvent::ListeningStarted { length } => {
                log::info!("Your turn: repeat {} signal(s)", length)
            }
            GameEvent::PlayerPressed { .. } => {}
            GameEvent::RoundComplete { length } => log::info!("Correct! Next sequence has {}", length),
            GameEvent::WrongSequence { expected, got, score } => {
                log::warn!("Wrong sequence! Expected {}, got {}. Score: {}", expected, got, score)
            }
            GameEvent::Closed => log::info!("Game closed"),
        }
    }
}
