//! Fixed timestep game loop
//!
//! Each frame: measure elapsed time, feed pending input to the session, run
//! as many fixed ticks as the accumulator allows, then draw and present.
//! Termination is only checked between ticks.

use super::clock::Clock;
use super::{EventSource, InputEvent, Presenter};
use crate::audio::ToneSink;
use crate::consts::*;
use crate::renderer::VertexBatch;
use crate::sim::{self, GameSession};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSummary {
    pub frames: u64,
    pub ticks: u64,
    /// Simulated seconds
    pub elapsed: f32,
    pub score: u32,
    pub sequence_length: usize,
    pub terminated: bool,
}

pub struct GameLoop<C: Clock> {
    clock: C,
    accumulator: f32,
    frame: VertexBatch,
    max_frames: Option<u64>,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            accumulator: 0.0,
            frame: VertexBatch::default(),
            max_frames: None,
        }
    }

    /// Stop after `frames` frames even if the game is still running
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run until the session terminates (or the frame limit is hit)
    pub fn run(
        &mut self,
        session: &mut GameSession,
        audio: &mut dyn ToneSink,
        events: &mut dyn EventSource,
        presenter: &mut dyn Presenter,
    ) -> LoopSummary {
        let mut inbox = Vec::new();
        let mut frames = 0u64;
        let mut ticks = 0u64;

        while !session.is_terminated() {
            if self.max_frames.is_some_and(|max| frames >= max) {
                log::warn!("Frame limit reached, stopping loop");
                break;
            }

            let dt = self.clock.frame_dt().min(MAX_FRAME_DT);

            events.poll(session, dt, &mut inbox);
            for event in inbox.drain(..) {
                match event {
                    InputEvent::Click(point) => {
                        session.handle_click(point, audio);
                    }
                    InputEvent::Close => session.close(),
                }
            }

            self.accumulator += dt;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && !session.is_terminated() {
                sim::tick(session, SIM_DT, audio);
                self.accumulator -= SIM_DT;
                substeps += 1;
                ticks += 1;
            }

            for event in session.drain_events() {
                presenter.notify(&event);
            }

            session.draw(&mut self.frame);
            presenter.present(&self.frame);
            frames += 1;

            self.clock.pause();
        }

        let summary = LoopSummary {
            frames,
            ticks,
            elapsed: ticks as f32 * SIM_DT,
            score: session.rounds_completed(),
            sequence_length: session.sequence().len(),
            terminated: session.is_terminated(),
        };
        log::info!(
            "Loop finished after {} frames ({:.1}s): score {}",
            summary.frames,
            summary.elapsed,
            summary.score
        );
        summary
    }
}
