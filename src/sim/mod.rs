//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - Elapsed time comes in through `tick`
//! - Seeded RNG only
//! - Audio and drawing go through the traits handed in by the caller

pub mod control;
pub mod palette;
pub mod sequence;
pub mod state;
pub mod tick;

pub use control::{ButtonState, CircleShape, Control};
pub use palette::{SignalId, SignalInfo};
pub use sequence::Sequence;
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::tick;
