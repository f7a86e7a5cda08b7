//! Signal palette
//!
//! The fixed set of signals the game plays. Each signal has a tone and two
//! display intensities (lit while pressed, dimmed while released).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::darken;

/// One of the colored, audible game signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalId {
    Yellow,
    Red,
    Green,
    Blue,
}

/// Display and tone data for one signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalInfo {
    /// Tone frequency (Hz)
    pub frequency: f32,
    /// Color while pressed
    pub lit: [f32; 4],
}

const PALETTE: [SignalInfo; 4] = [
    SignalInfo { frequency: 252.0, lit: [1.0, 1.0, 0.0, 1.0] },
    SignalInfo { frequency: 310.0, lit: [1.0, 0.0, 0.0, 1.0] },
    SignalInfo { frequency: 415.0, lit: [0.0, 1.0, 0.0, 1.0] },
    SignalInfo { frequency: 209.0, lit: [0.0, 0.0, 1.0, 1.0] },
];

/// Released color is the lit color darkened twice
const DIM_FACTOR: f32 = 0.7;

impl SignalId {
    /// All signals in palette order
    pub const ALL: [SignalId; 4] = [SignalId::Yellow, SignalId::Red, SignalId::Green, SignalId::Blue];

    /// Palette ordinal
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn info(self) -> &'static SignalInfo {
        &PALETTE[self.index()]
    }

    pub fn frequency(self) -> f32 {
        self.info().frequency
    }

    pub fn pressed_color(self) -> [f32; 4] {
        self.info().lit
    }

    pub fn released_color(self) -> [f32; 4] {
        darken(darken(self.info().lit, DIM_FACTOR), DIM_FACTOR)
    }

    /// Uniform draw over the whole palette
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalId::Yellow => "Yellow",
            SignalId::Red => "Red",
            SignalId::Green => "Green",
            SignalId::Blue => "Blue",
        }
    }
}

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
