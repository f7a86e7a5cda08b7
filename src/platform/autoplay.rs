//! Demo auto-player
//!
//! Watches the session like a player would: waits for the buttons to go dark,
//! then clicks the next expected signal. Optionally fumbles once the sequence
//! gets long enough so a demo run ends on its own.

use super::{EventSource, InputEvent};
use crate::settings::AutoplaySettings;
use crate::sim::{GamePhase, GameSession, SignalId};

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    settings: AutoplaySettings,
    /// Seconds left before the next click
    wait: f32,
}

impl AutoPlayer {
    pub fn new(settings: AutoplaySettings) -> Self {
        let wait = settings.reaction_secs;
        Self { settings, wait }
    }

    /// Signal the player will click next, if it is its turn
    fn next_signal(&self, session: &GameSession) -> Option<SignalId> {
        let entries = session.sequence().entries();
        let next = session.reply_index().map_or(0, |i| i + 1);
        let expected = *entries.get(next)?;

        let mistake_at = self.settings.mistake_at_length;
        if mistake_at > 0 && entries.len() >= mistake_at && next == entries.len() - 1 {
            let wrong = SignalId::ALL[(expected.index() + 1) % SignalId::ALL.len()];
            log::debug!("Autoplay fumbles: {} instead of {}", wrong, expected);
            return Some(wrong);
        }
        Some(expected)
    }
}

impl EventSource for AutoPlayer {
    fn poll(&mut self, session: &GameSession, dt: f32, out: &mut Vec<InputEvent>) {
        let busy = session.phase() != GamePhase::Listening
            || session.any_control_pressed()
            || session.controls().iter().any(|c| c.is_pressed());
        if busy || session.is_terminated() {
            self.wait = self.settings.reaction_secs;
            return;
        }

        self.wait -= dt;
        if self.wait > 0.0 {
            return;
        }

        if let Some(signal) = self.next_signal(session) {
            out.push(InputEvent::Click(session.control_center(signal)));
        }
        self.wait = self.settings.reaction_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Sequence, tick};

    use SignalId::*;

    fn listening_session(entries: Vec<SignalId>) -> GameSession {
        let mut session = GameSession::with_sequence(3, Sequence::from_entries(entries, 3));
        let mut sink: Vec<SignalId> = Vec::new();
        for _ in 0..200 {
            if session.phase() == GamePhase::Listening && session.controls().iter().all(|c| !c.is_pressed()) {
                break;
            }
            tick(&mut session, 0.1, &mut sink);
        }
        session
    }

    #[test]
    fn test_waits_for_reaction_time() {
        let session = listening_session(vec![Red, Green]);
        let mut player = AutoPlayer::new(AutoplaySettings {
            reaction_secs: 0.25,
            mistake_at_length: 0,
        });
        let mut out = Vec::new();

        player.poll(&session, 0.1, &mut out);
        player.poll(&session, 0.1, &mut out);
        assert!(out.is_empty());

        player.poll(&session, 0.1, &mut out);
        assert_eq!(out, vec![InputEvent::Click(session.control_center(Red))]);
    }

    #[test]
    fn test_silent_during_playback() {
        let session = GameSession::with_sequence(3, Sequence::from_entries(vec![Blue], 3));
        let mut player = AutoPlayer::new(AutoplaySettings::default());
        let mut out = Vec::new();
        for _ in 0..20 {
            player.poll(&session, 0.1, &mut out);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_fumbles_last_signal_at_length() {
        let session = listening_session(vec![Yellow]);
        let mut player = AutoPlayer::new(AutoplaySettings {
            reaction_secs: 0.0,
            mistake_at_length: 1,
        });
        let mut out = Vec::new();
        player.poll(&session, 0.1, &mut out);
        assert_eq!(out, vec![InputEvent::Click(session.control_center(Red))]);
    }
}
