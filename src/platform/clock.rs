//! Frame timing

use std::time::{Duration, Instant};

use crate::consts::FRAME_SLEEP_MS;

/// Source of frame deltas
pub trait Clock {
    /// Seconds since the previous call
    fn frame_dt(&mut self) -> f32;
    /// Yield between frames
    fn pause(&mut self);
}

/// Wall clock; sleeps a little between frames so the event source can run
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
    sleep: Duration,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            sleep: Duration::from_millis(FRAME_SLEEP_MS),
        }
    }
}

impl Clock for SystemClock {
    fn frame_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    fn pause(&mut self) {
        std::thread::sleep(self.sleep);
    }
}

/// Fixed-step clock for tests and replays
#[derive(Debug, Clone)]
pub struct ManualClock {
    step: f32,
    elapsed: f32,
}

impl ManualClock {
    pub fn new(step: f32) -> Self {
        Self { step, elapsed: 0.0 }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Clock for ManualClock {
    fn frame_dt(&mut self) -> f32 {
        self.elapsed += self.step;
        self.step
    }

    fn pause(&mut self) {}
}
