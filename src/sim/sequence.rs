//! The secret sequence
//!
//! Append-only list of signals plus a replay cursor. The sequence drives
//! playback by pressing the session's controls directly; it never owns them.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::control::Control;
use super::palette::SignalId;
use crate::audio::ToneSink;

#[derive(Debug, Clone)]
pub struct Sequence {
    entries: Vec<SignalId>,
    /// Next entry to play; `None` when not replaying (or replay just finished)
    cursor: Option<usize>,
    rng: Pcg32,
}

impl Sequence {
    /// New sequence holding one random signal
    pub fn new(rng: Pcg32) -> Self {
        let mut sequence = Self {
            entries: Vec::new(),
            cursor: None,
            rng,
        };
        sequence.append_random();
        sequence
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }

    /// Sequence with fixed contents (still grows randomly)
    pub fn from_entries(entries: Vec<SignalId>, seed: u64) -> Self {
        assert!(!entries.is_empty(), "a sequence holds at least one signal");
        Self {
            entries,
            cursor: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Grow by one uniformly random signal (repeats allowed)
    pub fn append_random(&mut self) {
        let signal = SignalId::random(&mut self.rng);
        self.entries.push(signal);
    }

    /// Whether the player's `candidate` matches the entry at `index`.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn is_correct_at(&self, index: usize, candidate: SignalId) -> bool {
        self.entries[index] == candidate
    }

    /// One playback step against the live controls.
    ///
    /// The first call after a reset only arms the cursor. Each later call
    /// presses the next signal once the previous one has released itself.
    /// Returns the signal pressed by this step, if any.
    pub fn advance_playback(
        &mut self,
        controls: &mut [Control],
        sink: &mut dyn ToneSink,
    ) -> Option<SignalId> {
        let Some(cursor) = self.cursor else {
            self.cursor = Some(0);
            return None;
        };

        // Wait for the previous cue to go dark
        if cursor > 0 && controls[self.entries[cursor - 1].index()].is_pressed() {
            return None;
        }

        let current = self.entries[cursor];
        controls[current.index()].activate(sink);
        log::debug!("Playback {}/{}: {}", cursor + 1, self.entries.len(), current);

        let next = cursor + 1;
        self.cursor = if next == self.entries.len() { None } else { Some(next) };
        Some(current)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true; a sequence starts with one entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SignalId] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}
