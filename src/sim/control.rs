//! On-screen signal buttons
//!
//! A button has 2 states, pressed and released. Activating it plays its tone
//! and lights it up; it releases itself once it has been held longer than
//! [`PRESS_DURATION`], whoever pressed it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::palette::SignalId;
use crate::audio::ToneSink;
use crate::consts::*;
use crate::box_center;

/// Button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
}

/// A filled circle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Vec2,
    pub radius: f32,
}

impl CircleShape {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Strict interior test (points on the rim are outside)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) < self.radius * self.radius
    }
}

/// One signal button
#[derive(Debug, Clone)]
pub struct Control {
    id: SignalId,
    state: ButtonState,
    /// Seconds held; only meaningful while pressed
    pressed_elapsed: f32,
    shape: CircleShape,
}

impl Control {
    pub fn new(id: SignalId, shape: CircleShape) -> Self {
        Self {
            id,
            state: ButtonState::Released,
            pressed_elapsed: 0.0,
            shape,
        }
    }

    /// One control per signal, placed on the standard 2x2 layout
    pub fn standard_layout() -> Vec<Control> {
        SignalId::ALL
            .iter()
            .zip(BUTTON_ORIGINS)
            .map(|(&id, origin)| {
                let shape = CircleShape::new(box_center(origin, BUTTON_DIAMETER), BUTTON_DIAMETER / 2.0);
                Control::new(id, shape)
            })
            .collect()
    }

    /// Press the button if it is released.
    ///
    /// Returns false (and leaves the timer and audio alone) if it was already pressed.
    pub fn activate(&mut self, sink: &mut dyn ToneSink) -> bool {
        if self.state == ButtonState::Pressed {
            return false;
        }
        self.state = ButtonState::Pressed;
        self.pressed_elapsed = 0.0;
        sink.play(self.id);
        true
    }

    /// Advance the press timer. Returns the signal id on the tick the button
    /// releases itself.
    pub fn tick(&mut self, dt: f32) -> Option<SignalId> {
        if self.state == ButtonState::Released {
            return None;
        }

        self.pressed_elapsed += dt;
        if self.pressed_elapsed > PRESS_DURATION {
            self.state = ButtonState::Released;
            return Some(self.id);
        }
        None
    }

    #[inline]
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.shape.contains(point)
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    pub fn id(&self) -> SignalId {
        self.id
    }

    pub fn shape(&self) -> &CircleShape {
        &self.shape
    }

    pub fn pressed_elapsed(&self) -> f32 {
        self.pressed_elapsed
    }

    /// Current fill color
    pub fn color(&self) -> [f32; 4] {
        match self.state {
            ButtonState::Pressed => self.id.pressed_color(),
            ButtonState::Released => self.id.released_color(),
        }
    }
}
