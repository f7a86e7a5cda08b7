//! Session tick and input handling
//!
//! The session alternates between two phases. In Playback the sequence
//! presses the controls one by one; in Listening every player press is checked
//! against the sequence once its control goes dark again.

use glam::Vec2;

use super::palette::SignalId;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::audio::ToneSink;

/// Advance the game by `dt` seconds
pub fn tick(session: &mut GameSession, dt: f32, sink: &mut dyn ToneSink) {
    if session.terminated {
        return;
    }

    // Button timers first: releases must land before the phase logic runs
    for i in 0..session.controls.len() {
        if let Some(signal) = session.controls[i].tick(dt) {
            session.on_control_released(signal);
        }
    }

    match session.phase {
        GamePhase::Playback => {
            if let Some(signal) = session.sequence.advance_playback(&mut session.controls, sink) {
                session.events.push(GameEvent::SignalPlayed { signal });
            }
            if session.sequence.is_finished() {
                session.start_listening();
            }
        }
        GamePhase::Listening => {
            // Wait for the player's control to go dark
            if session.any_control_pressed {
                return;
            }
            // Nothing pressed yet
            let Some(index) = session.reply_index else {
                return;
            };
            let Some(got) = session.last_pressed else {
                return;
            };

            if !session.sequence.is_correct_at(index, got) {
                session.fail(index, got);
                return;
            }

            if index == session.sequence.len() - 1 {
                session.finish_round();
            }
        }
    }
}

impl GameSession {
    /// A click at `point` (window coordinates).
    ///
    /// Only taken in Listening, and only while every control is dark: the
    /// player's previous press and the last playback cue both block input
    /// until they release. Returns true if the click was taken as a press.
    pub fn handle_click(&mut self, point: Vec2, sink: &mut dyn ToneSink) -> bool {
        if self.terminated || self.phase == GamePhase::Playback {
            return false;
        }

        // One live press at a time, including the last playback cue
        if self.any_control_pressed || self.controls.iter().any(|c| c.is_pressed()) {
            return false;
        }

        // Buttons don't overlap; the first hit wins
        let Some(control) = self.controls.iter_mut().find(|c| c.hit_test(point)) else {
            return false;
        };

        let index = self.reply_index.map_or(0, |i| i + 1);
        self.reply_index = Some(index);
        control.activate(sink);
        self.any_control_pressed = true;

        let signal = control.id();
        log::debug!("Player pressed {} (#{})", signal, index + 1);
        self.events.push(GameEvent::PlayerPressed { signal, index });
        true
    }

    /// Release notification from a control.
    ///
    /// Playback releases are not player feedback and are ignored.
    pub fn on_control_released(&mut self, signal: SignalId) {
        if self.phase == GamePhase::Playback {
            return;
        }
        self.any_control_pressed = false;
        self.last_pressed = Some(signal);
    }

    /// Window close: end the game right away
    pub fn close(&mut self) {
        if !self.terminated {
            log::info!("Window closed, ending game");
            self.events.push(GameEvent::Closed);
        }
        self.terminated = true;
    }

    fn start_listening(&mut self) {
        self.phase = GamePhase::Listening;
        self.reply_index = None;
        self.last_pressed = None;
        self.events.push(GameEvent::ListeningStarted {
            length: self.sequence.len(),
        });
    }

    fn finish_round(&mut self) {
        self.phase = GamePhase::Playback;
        self.sequence.append_random();
        self.rounds_completed += 1;
        let length = self.sequence.len();
        log::info!("Round {} complete, sequence grows to {}", self.rounds_completed, length);
        self.events.push(GameEvent::RoundComplete { length });
    }

    fn fail(&mut self, index: usize, got: SignalId) {
        let expected = self.sequence.entries()[index];
        log::info!(
            "Wrong sequence! Expected {} at #{}, got {} (score {})",
            expected,
            index + 1,
            got,
            self.rounds_completed
        );
        self.events.push(GameEvent::WrongSequence {
            expected,
            got,
            score: self.rounds_completed,
        });
        self.terminated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::Sequence;
    use proptest::prelude::*;

    use SignalId::*;

    const STEP: f32 = 0.1;
    const MAX_STEPS: usize = 1000;

    fn session_with(entries: Vec<SignalId>) -> GameSession {
        GameSession::with_sequence(7, Sequence::from_entries(entries, 7))
    }

    /// Tick until playback is over and every button is dark
    fn play_to_listening(session: &mut GameSession, sink: &mut Vec<SignalId>) {
        for _ in 0..MAX_STEPS {
            if session.phase() == GamePhase::Listening && session.controls().iter().all(|c| !c.is_pressed()) {
                return;
            }
            tick(session, STEP, sink);
        }
        panic!("never reached listening");
    }

    /// Click a signal's button and tick until it releases
    fn press(session: &mut GameSession, signal: SignalId, sink: &mut Vec<SignalId>) {
        let center = session.control_center(signal);
        assert!(session.handle_click(center, sink), "click on {signal} rejected");
        for _ in 0..MAX_STEPS {
            tick(session, STEP, sink);
            if !session.any_control_pressed() {
                return;
            }
        }
        panic!("control never released");
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(12345);
        assert_eq!(session.phase(), GamePhase::Playback);
        assert_eq!(session.sequence().len(), 1);
        assert_eq!(session.controls().len(), 4);
        assert_eq!(session.reply_index(), None);
        assert!(!session.is_terminated());
    }

    #[test]
    fn test_end_to_end_first_round() {
        let mut session = GameSession::new(12345);
        let mut sink: Vec<SignalId> = Vec::new();
        let first = session.sequence().entries()[0];

        // Tick 1 arms playback
        tick(&mut session, SIM_DT, &mut sink);
        assert_eq!(session.phase(), GamePhase::Playback);
        assert!(sink.is_empty());

        // Tick 2 plays the only entry and finishes playback
        tick(&mut session, SIM_DT, &mut sink);
        assert_eq!(sink, vec![first]);
        assert_eq!(session.phase(), GamePhase::Listening);
        assert!(session.control(first).is_pressed());

        play_to_listening(&mut session, &mut sink);
        press(&mut session, first, &mut sink);

        assert_eq!(session.phase(), GamePhase::Playback);
        assert_eq!(session.sequence().len(), 2);
        assert_eq!(session.sequence().entries()[0], first);
        assert_eq!(session.rounds_completed(), 1);
        assert!(!session.is_terminated());
    }

    #[test]
    fn test_wrong_press_ends_game() {
        let mut session = session_with(vec![Red, Blue, Green]);
        let mut sink: Vec<SignalId> = Vec::new();

        play_to_listening(&mut session, &mut sink);
        assert_eq!(sink, vec![Red, Blue, Green]);
        session.drain_events();

        press(&mut session, Red, &mut sink);
        press(&mut session, Blue, &mut sink);
        assert_eq!(session.phase(), GamePhase::Listening);
        press(&mut session, Yellow, &mut sink);

        assert!(session.is_terminated());
        assert_eq!(session.reply_index(), Some(2));
        assert_eq!(session.sequence().len(), 3);
        assert!(session.drain_events().contains(&GameEvent::WrongSequence {
            expected: Green,
            got: Yellow,
            score: 0,
        }));
    }

    #[test]
    fn test_correct_replay_grows_sequence() {
        let mut session = session_with(vec![Red, Blue, Green]);
        let mut sink: Vec<SignalId> = Vec::new();

        play_to_listening(&mut session, &mut sink);
        press(&mut session, Red, &mut sink);
        assert_eq!(session.reply_index(), Some(0));
        press(&mut session, Blue, &mut sink);
        assert_eq!(session.reply_index(), Some(1));
        press(&mut session, Green, &mut sink);

        assert_eq!(session.phase(), GamePhase::Playback);
        assert_eq!(session.sequence().len(), 4);
        assert_eq!(&session.sequence().entries()[..3], &[Red, Blue, Green]);
        assert!(!session.is_terminated());

        // Next listening phase starts from scratch
        play_to_listening(&mut session, &mut sink);
        assert_eq!(session.reply_index(), None);
    }

    #[test]
    fn test_playback_rearms_after_round() {
        let mut session = session_with(vec![Red]);
        let mut sink: Vec<SignalId> = Vec::new();
        play_to_listening(&mut session, &mut sink);
        press(&mut session, Red, &mut sink);
        assert_eq!(session.phase(), GamePhase::Playback);
        assert_eq!(session.sequence().cursor(), None);
        let played = sink.len();

        // First playback tick of the new round only arms
        tick(&mut session, STEP, &mut sink);
        assert_eq!(session.sequence().cursor(), Some(0));
        assert_eq!(sink.len(), played);
        assert!(session.controls().iter().all(|c| !c.is_pressed()));

        tick(&mut session, STEP, &mut sink);
        assert_eq!(&sink[played..], &[Red]);
        assert_eq!(session.sequence().cursor(), Some(1));
        assert!(session.control(Red).is_pressed());
    }

    #[test]
    fn test_clicks_ignored_during_playback() {
        let mut session = session_with(vec![Red, Blue]);
        let mut sink: Vec<SignalId> = Vec::new();

        tick(&mut session, STEP, &mut sink);
        let center = session.control_center(Red);
        assert!(!session.handle_click(center, &mut sink));
        assert_eq!(session.reply_index(), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_no_chord_while_pressed() {
        let mut session = session_with(vec![Red, Blue]);
        let mut sink: Vec<SignalId> = Vec::new();
        play_to_listening(&mut session, &mut sink);

        assert!(session.handle_click(session.control_center(Red), &mut sink));
        assert!(session.any_control_pressed());
        let played = sink.len();

        assert!(!session.handle_click(session.control_center(Blue), &mut sink));
        assert_eq!(session.reply_index(), Some(0));
        assert!(!session.control(Blue).is_pressed());
        assert_eq!(sink.len(), played);
    }

    #[test]
    fn test_lit_playback_cue_blocks_clicks() {
        let mut session = session_with(vec![Red]);
        let mut sink: Vec<SignalId> = Vec::new();
        tick(&mut session, STEP, &mut sink);
        tick(&mut session, STEP, &mut sink);
        assert_eq!(session.phase(), GamePhase::Listening);
        assert!(!session.any_control_pressed());
        assert!(session.control(Red).is_pressed());

        assert!(!session.handle_click(session.control_center(Blue), &mut sink));
        assert_eq!(session.reply_index(), None);

        play_to_listening(&mut session, &mut sink);
        assert!(session.handle_click(session.control_center(Blue), &mut sink));
    }

    #[test]
    fn test_click_outside_buttons_is_ignored() {
        let mut session = session_with(vec![Red]);
        let mut sink: Vec<SignalId> = Vec::new();
        play_to_listening(&mut session, &mut sink);

        assert!(!session.handle_click(Vec2::new(225.0, 225.0), &mut sink));
        assert!(!session.handle_click(Vec2::new(-10.0, 40.0), &mut sink));
        assert_eq!(session.reply_index(), None);
        assert!(!session.any_control_pressed());
    }

    #[test]
    fn test_playback_release_is_not_feedback() {
        let mut session = session_with(vec![Green, Red]);
        let mut sink: Vec<SignalId> = Vec::new();

        // Green plays, then releases while still in playback
        tick(&mut session, STEP, &mut sink);
        tick(&mut session, STEP, &mut sink);
        for _ in 0..11 {
            tick(&mut session, STEP, &mut sink);
        }
        assert!(!session.control(Green).is_pressed());
        assert_eq!(session.last_pressed(), None);
    }

    #[test]
    fn test_waits_for_first_press() {
        let mut session = session_with(vec![Red]);
        let mut sink: Vec<SignalId> = Vec::new();
        play_to_listening(&mut session, &mut sink);

        for _ in 0..50 {
            tick(&mut session, STEP, &mut sink);
        }
        assert_eq!(session.phase(), GamePhase::Listening);
        assert!(!session.is_terminated());
    }

    #[test]
    fn test_termination_is_final() {
        let mut session = session_with(vec![Red]);
        let mut sink: Vec<SignalId> = Vec::new();
        play_to_listening(&mut session, &mut sink);
        press(&mut session, Blue, &mut sink);
        assert!(session.is_terminated());

        let phase = session.phase();
        let played = sink.len();
        for _ in 0..30 {
            tick(&mut session, STEP, &mut sink);
            session.handle_click(session.control_center(Red), &mut sink);
        }
        session.close();
        assert!(session.is_terminated());
        assert_eq!(session.phase(), phase);
        assert_eq!(sink.len(), played);
        assert!(!session.drain_events().contains(&GameEvent::Closed));
    }

    #[test]
    fn test_close_terminates() {
        let mut session = GameSession::new(1);
        session.close();
        assert!(session.is_terminated());
        assert_eq!(session.drain_events(), vec![GameEvent::Closed]);
        session.close();
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(99999);
        let mut b = GameSession::new(99999);
        let mut sink: Vec<SignalId> = Vec::new();
        for _ in 0..3 {
            play_to_listening(&mut a, &mut sink);
            play_to_listening(&mut b, &mut sink);
            for i in 0..a.sequence().len() {
                let signal = a.sequence().entries()[i];
                press(&mut a, signal, &mut sink);
                press(&mut b, signal, &mut sink);
            }
        }
        assert_eq!(a.sequence().entries(), b.sequence().entries());
        assert_eq!(a.rounds_completed(), 3);
        assert_eq!(b.rounds_completed(), 3);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Tick(f32),
        Click(usize),
        ClickExpected,
        ClickAt(f32, f32),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => (0.0f32..0.6).prop_map(Action::Tick),
            1 => (0usize..4).prop_map(Action::Click),
            3 => Just(Action::ClickExpected),
            1 => (0.0f32..450.0, 0.0f32..450.0).prop_map(|(x, y)| Action::ClickAt(x, y)),
        ]
    }

    proptest! {
        #[test]
        fn prop_session_invariants(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..300)) {
            let mut session = GameSession::new(seed);
            let mut sink: Vec<SignalId> = Vec::new();

            for action in actions {
                let before_entries = session.sequence().entries().to_vec();
                let before_reply = session.reply_index();
                let before_phase = session.phase();
                let before_rounds = session.rounds_completed();
                let was_terminated = session.is_terminated();

                let accepted = match action {
                    Action::Tick(dt) => {
                        tick(&mut session, dt, &mut sink);
                        None
                    }
                    Action::Click(i) => {
                        let center = session.control_center(SignalId::ALL[i]);
                        Some(session.handle_click(center, &mut sink))
                    }
                    Action::ClickExpected => {
                        let next = before_reply.map_or(0, |i| i + 1);
                        let signal = before_entries.get(next).copied().unwrap_or(Yellow);
                        let center = session.control_center(signal);
                        Some(session.handle_click(center, &mut sink))
                    }
                    Action::ClickAt(x, y) => Some(session.handle_click(Vec2::new(x, y), &mut sink)),
                };

                let entries = session.sequence().entries();
                prop_assert!(!entries.is_empty());
                prop_assert_eq!(&entries[..before_entries.len()], &before_entries[..]);

                let grown = entries.len() - before_entries.len();
                prop_assert!(grown <= 1);
                if grown == 1 {
                    prop_assert_eq!(session.rounds_completed(), before_rounds + 1);
                    prop_assert_eq!(session.phase(), GamePhase::Playback);
                    prop_assert_eq!(before_phase, GamePhase::Listening);
                }

                match accepted {
                    Some(true) => {
                        prop_assert_eq!(session.reply_index(), Some(before_reply.map_or(0, |i| i + 1)));
                    }
                    Some(false) => prop_assert_eq!(session.reply_index(), before_reply),
                    None => {
                        if before_phase == GamePhase::Playback && session.phase() == GamePhase::Listening {
                            prop_assert_eq!(session.reply_index(), None);
                        } else {
                            prop_assert_eq!(session.reply_index(), before_reply);
                        }
                    }
                }

                if was_terminated {
                    prop_assert!(session.is_terminated());
                    prop_assert_eq!(session.phase(), before_phase);
                    prop_assert_ne!(accepted, Some(true));
                }
            }
        }
    }
}
