//! Genius - a Simon-style memory game
//!
//! Core modules:
//! - `sim`: Game state machine (palette, controls, sequence, session)
//! - `audio`: Tone bank and playback dispatch
//! - `renderer`: Draw context and vertex batching
//! - `platform`: Loop driver, input events and demo auto-player
//! - `settings`: Player preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{AutoplaySettings, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// How long a control stays lit after activation (seconds, exclusive)
    pub const PRESS_DURATION: f32 = 1.0;

    /// Fixed simulation timestep (60 Hz is plenty for button timing)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame delta clamp (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Pause between frames so the event source gets to run (milliseconds)
    pub const FRAME_SLEEP_MS: u64 = 10;

    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 450.0;
    pub const WINDOW_HEIGHT: f32 = 450.0;

    /// Button layout: top-left corner of each button's bounding box, in palette order
    pub const BUTTON_ORIGINS: [(f32, f32); 4] = [(50.0, 50.0), (300.0, 50.0), (50.0, 300.0), (300.0, 300.0)];
    /// Button bounding box size (buttons are round)
    pub const BUTTON_DIAMETER: f32 = 100.0;
    /// Tessellation for round buttons
    pub const BUTTON_SEGMENTS: u32 = 48;

    /// Clear color
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

/// Darken an RGBA color by a factor, keeping alpha
#[inline]
pub fn darken(color: [f32; 4], factor: f32) -> [f32; 4] {
    [color[0] * factor, color[1] * factor, color[2] * factor, color[3]]
}

/// Center of a box given its top-left corner and size
#[inline]
pub fn box_center(origin: (f32, f32), size: f32) -> Vec2 {
    Vec2::new(origin.0 + size / 2.0, origin.1 + size / 2.0)
}
