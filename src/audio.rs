//! Audio system
//!
//! Procedurally generated signal tones - no external files needed!
//! All tones are synthesized up front when the manager is created and handed
//! to an output backend on demand.

use std::f32::consts::TAU;

use crate::settings::Settings;
use crate::sim::SignalId;

/// Output sample rate (Hz)
pub const SAMPLE_RATE: u32 = 44_100;
/// Length of one signal tone (seconds)
pub const TONE_DURATION: f32 = 0.45;
/// Attack/release ramp length (seconds)
const ENVELOPE: f32 = 0.02;

/// Anything that can play a signal's tone.
///
/// Playback is fire-and-forget: no acknowledgement, no failure reported.
pub trait ToneSink {
    fn play(&mut self, signal: SignalId);
}

/// Device-side end of the audio path
pub trait ToneOutput {
    /// Queue samples for playback, mono, at [`SAMPLE_RATE`]
    fn submit(&mut self, signal: SignalId, samples: &[f32], volume: f32);
}

/// Output that only reports what it would play
#[derive(Debug, Default)]
pub struct LogOutput;

impl ToneOutput for LogOutput {
    fn submit(&mut self, signal: SignalId, samples: &[f32], volume: f32) {
        log::debug!(
            "tone {} ({} samples, volume {:.2})",
            signal,
            samples.len(),
            volume
        );
    }
}

/// A synthesized tone
#[derive(Debug, Clone)]
pub struct Tone {
    pub samples: Vec<f32>,
}

impl Tone {
    /// Sine tone with a linear attack/release envelope
    pub fn synthesize(frequency: f32, duration: f32) -> Self {
        let count = (duration * SAMPLE_RATE as f32) as usize;
        let ramp = ((ENVELOPE * SAMPLE_RATE as f32) as usize).max(1);
        let samples = (0..count)
            .map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let attack = (i as f32 / ramp as f32).min(1.0);
                let release = ((count - i) as f32 / ramp as f32).min(1.0);
                (TAU * frequency * t).sin() * attack.min(release)
            })
            .collect();
        Self { samples }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<Box<dyn ToneOutput>>,
    tones: Vec<Tone>,
    /// Master * SFX volume, zero when muted
    volume: f32,
}

impl AudioManager {
    /// Synthesize every signal tone and take ownership of the output.
    ///
    /// With no output the manager still works, it just stays silent.
    pub fn new(settings: &Settings, output: Option<Box<dyn ToneOutput>>) -> Self {
        if output.is_none() {
            log::warn!("No audio output available - audio disabled");
        }
        let tones = SignalId::ALL
            .iter()
            .map(|id| Tone::synthesize(id.frequency(), TONE_DURATION))
            .collect();
        log::info!("Loaded {} signal tones", SignalId::ALL.len());
        Self {
            output,
            tones,
            volume: settings.effective_volume(),
        }
    }

    pub fn tone(&self, signal: SignalId) -> &Tone {
        &self.tones[signal.index()]
    }

    /// Release the output and the tone bank
    pub fn shutdown(mut self) {
        self.output.take();
        self.tones.clear();
        log::info!("Audio shut down");
    }
}

impl ToneSink for AudioManager {
    fn play(&mut self, signal: SignalId) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(output) = self.output.as_mut() else { return };
        output.submit(signal, &self.tones[signal.index()].samples, vol);
    }
}

/// Recording sink for tests
#[cfg(test)]
impl ToneSink for Vec<SignalId> {
    fn play(&mut self, signal: SignalId) {
        self.push(signal);
    }
}
