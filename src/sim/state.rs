//! Game session state and core types
//!
//! The session owns the controls and the sequence. Phase transitions live in
//! `tick.rs`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::control::Control;
use super::palette::SignalId;
use super::sequence::Sequence;
use crate::consts::BACKGROUND;
use crate::renderer::DrawContext;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// The game is showing the sequence to the player
    Playback,
    /// Waiting for the player to repeat the sequence
    Listening,
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A control lit up during playback
    SignalPlayed { signal: SignalId },
    /// Playback finished, the player's turn starts
    ListeningStarted { length: usize },
    /// The player accepted a press
    PlayerPressed { signal: SignalId, index: usize },
    /// The whole sequence was repeated correctly
    RoundComplete { length: usize },
    /// The player got it wrong; the game is over
    WrongSequence { expected: SignalId, got: SignalId, score: u32 },
    /// The window was closed
    Closed,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Current phase
    pub(super) phase: GamePhase,
    /// One control per signal, in palette order
    pub(super) controls: Vec<Control>,
    pub(super) sequence: Sequence,
    /// Last control released by the player (Listening only)
    pub(super) last_pressed: Option<SignalId>,
    /// Whether the player's latest press is still lit
    pub(super) any_control_pressed: bool,
    /// Index of the latest accepted press in this Listening phase
    pub(super) reply_index: Option<usize>,
    /// Sequences repeated correctly so far
    pub(super) rounds_completed: u32,
    pub(super) terminated: bool,
    /// Pending events for the presentation layer
    pub(super) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_sequence(seed, Sequence::with_seed(seed))
    }

    /// Create a session around an existing sequence
    pub fn with_sequence(seed: u64, sequence: Sequence) -> Self {
        log::info!("New session (seed {}), first signal ready", seed);
        Self {
            phase: GamePhase::Playback,
            controls: Control::standard_layout(),
            sequence,
            last_pressed: None,
            any_control_pressed: false,
            reply_index: None,
            rounds_completed: 0,
            terminated: false,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, signal: SignalId) -> &Control {
        &self.controls[signal.index()]
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn last_pressed(&self) -> Option<SignalId> {
        self.last_pressed
    }

    pub fn any_control_pressed(&self) -> bool {
        self.any_control_pressed
    }

    pub fn reply_index(&self) -> Option<usize> {
        self.reply_index
    }

    /// Score: sequences repeated correctly
    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    /// True once the game is over. Never reverts.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Center of a signal's button, handy for scripted input
    pub fn control_center(&self, signal: SignalId) -> Vec2 {
        self.control(signal).shape().center
    }

    /// Clear the surface and paint every button
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        ctx.clear(BACKGROUND);
        for control in &self.controls {
            let shape = control.shape();
            ctx.fill_circle(shape.center, shape.radius, control.color());
        }
    }
}
