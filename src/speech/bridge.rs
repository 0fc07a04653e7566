//! Voice I/O bridge between the widget and the platform speech capabilities
//!
//! Owns the single synthesis/recognition session and the speaking/listening
//! flags. Its core value is the silence debounce: continuous partial
//! transcripts are converted into discrete submitted utterances by a 2s
//! timer that re-arms on every new partial.

use crate::speech::capability::{SpeechRecognition, SpeechSynthesis, Utterance};
use crate::timing::TimerSlot;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// One-time notice appended to the conversation when recognition is absent.
pub const RECOGNITION_UNAVAILABLE_NOTICE: &str =
    "Lo siento, el reconocimiento de voz no está disponible en este dispositivo.";

/// Events surfaced by the bridge to the widget engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    /// A new partial transcript replaced the draft.
    DraftUpdated(String),
    /// The silence timer fired over a non-empty draft; submit this text.
    UtteranceReady(String),
    /// The current utterance finished naturally.
    SpeechFinished,
    /// Listening was requested but recognition is absent. Emitted once.
    RecognitionUnavailable(&'static str),
}

/// Wraps the platform speech capabilities and enforces mutual exclusion
/// between speaking and listening.
pub struct VoiceBridge {
    synthesis: Box<dyn SpeechSynthesis>,
    recognition: Box<dyn SpeechRecognition>,
    locale: String,
    rate: f32,
    silence_window: Duration,
    /// Resume listening automatically once the widget finishes speaking
    conversation_mode: bool,
    speaking: bool,
    listening: bool,
    draft: String,
    silence: TimerSlot,
    unavailable_notified: bool,
    pending: Vec<BridgeEvent>,
}

impl VoiceBridge {
    pub fn new(
        synthesis: Box<dyn SpeechSynthesis>,
        recognition: Box<dyn SpeechRecognition>,
        locale: impl Into<String>,
        rate: f32,
        silence_window: Duration,
        conversation_mode: bool,
    ) -> Self {
        Self {
            synthesis,
            recognition,
            locale: locale.into(),
            rate,
            silence_window,
            conversation_mode,
            speaking: false,
            listening: false,
            draft: String::new(),
            silence: TimerSlot::new(),
            unavailable_notified: false,
            pending: Vec::new(),
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn recognition_available(&self) -> bool {
        self.recognition.is_available()
    }

    pub fn conversation_mode(&self) -> bool {
        self.conversation_mode
    }

    /// Enable or disable conversation mode. The draft and the recognition
    /// buffer are cleared on every mode change.
    pub fn set_conversation_mode(&mut self, enabled: bool) {
        self.conversation_mode = enabled;
        self.draft.clear();
        self.silence.cancel();
        self.recognition.reset();
    }

    /// Speak one utterance, cancelling any in-flight one. Listening stops
    /// while the widget talks and resumes on completion when conversation
    /// mode is enabled.
    pub fn speak(&mut self, text: &str, now: Instant) {
        if text.is_empty() {
            return;
        }

        self.synthesis.cancel();
        self.stop_listening();

        self.speaking = true;
        self.synthesis.start(
            Utterance {
                text: text.to_string(),
                locale: self.locale.clone(),
                rate: self.rate,
            },
            now,
        );
    }

    /// Begin continuous recognition. Suppressed while speaking; with absent
    /// recognition a one-time unavailability notice is emitted instead.
    pub fn start_listening(&mut self) {
        if self.speaking {
            debug!("start_listening suppressed while speaking");
            return;
        }

        if !self.recognition.is_available() {
            if !self.unavailable_notified {
                self.unavailable_notified = true;
                info!("Speech recognition unavailable");
                self.pending
                    .push(BridgeEvent::RecognitionUnavailable(
                        RECOGNITION_UNAVAILABLE_NOTICE,
                    ));
            }
            return;
        }

        if self.listening {
            return;
        }

        self.recognition.start(&self.locale);
        self.listening = true;
    }

    /// Stop continuous recognition. Idempotent.
    pub fn stop_listening(&mut self) {
        if self.listening {
            self.recognition.stop();
            self.listening = false;
        }
        self.silence.cancel();
    }

    /// Poll the capabilities and the silence timer.
    pub fn tick(&mut self, now: Instant) -> Vec<BridgeEvent> {
        let mut events = std::mem::take(&mut self.pending);

        // Utterance completion re-arms recognition in conversation mode
        if self.speaking && self.synthesis.poll_finished(now) {
            self.speaking = false;
            events.push(BridgeEvent::SpeechFinished);
            if self.conversation_mode && self.recognition.is_available() {
                self.start_listening();
                events.append(&mut std::mem::take(&mut self.pending));
            }
        }

        // Each new partial replaces the draft and re-arms the silence timer
        if self.listening {
            if let Some(partial) = self.recognition.poll_partial() {
                self.draft = partial.clone();
                self.silence.schedule(now, self.silence_window);
                events.push(BridgeEvent::DraftUpdated(partial));
            }
        }

        // A pause after a non-empty draft becomes one discrete submission
        if self.silence.fire(now) {
            let text = self.draft.trim().to_string();
            self.draft.clear();
            if !text.is_empty() {
                info!("Silence detected, submitting utterance: {}", text);
                self.stop_listening();
                self.recognition.reset();
                events.push(BridgeEvent::UtteranceReady(text));
            }
        }

        events
    }

    /// Cancel everything in flight. Called on teardown so no capability
    /// callback outlives the widget.
    pub fn shutdown(&mut self) {
        self.synthesis.cancel();
        self.speaking = false;
        self.stop_listening();
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::capability::{
        ChannelRecognition, NullSynthesis, TimedSynthesis, UnsupportedRecognition,
    };

    const SILENCE: Duration = Duration::from_millis(2000);

    fn bridge_with_recognition() -> (VoiceBridge, crate::speech::RecognitionFeed) {
        let (rec, feed) = ChannelRecognition::new();
        let bridge = VoiceBridge::new(
            Box::new(TimedSynthesis::new()),
            Box::new(rec),
            "es-ES",
            1.0,
            SILENCE,
            true,
        );
        (bridge, feed)
    }

    #[test]
    fn test_debounce_submits_after_silence_gap() {
        let now = Instant::now();
        let (mut bridge, feed) = bridge_with_recognition();
        bridge.start_listening();

        // Partials arriving within the window never submit
        feed.push("ho");
        let events = bridge.tick(now);
        assert!(events.contains(&BridgeEvent::DraftUpdated("ho".into())));

        feed.push("hola");
        bridge.tick(now + Duration::from_millis(800));

        feed.push("hola asistente");
        let events = bridge.tick(now + Duration::from_millis(1600));
        assert!(events.contains(&BridgeEvent::DraftUpdated("hola asistente".into())));
        assert!(!events
            .iter()
            .any(|e| matches!(e, BridgeEvent::UtteranceReady(_))));

        // 2s of silence after the last partial flushes exactly one utterance
        let events = bridge.tick(now + Duration::from_millis(3600));
        assert_eq!(
            events,
            vec![BridgeEvent::UtteranceReady("hola asistente".into())]
        );
        assert!(!bridge.is_listening());

        // Nothing further fires
        assert!(bridge.tick(now + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_silence_over_whitespace_draft_submits_nothing() {
        let now = Instant::now();
        let (mut bridge, feed) = bridge_with_recognition();
        bridge.start_listening();

        feed.push("   ");
        bridge.tick(now);
        let events = bridge.tick(now + Duration::from_millis(2500));
        assert!(!events
            .iter()
            .any(|e| matches!(e, BridgeEvent::UtteranceReady(_))));
    }

    #[test]
    fn test_speaking_and_listening_are_mutually_exclusive() {
        let now = Instant::now();
        let (mut bridge, _feed) = bridge_with_recognition();

        bridge.start_listening();
        assert!(bridge.is_listening());

        bridge.speak("Bienvenido", now);
        assert!(bridge.is_speaking());
        assert!(!bridge.is_listening());

        // Suppressed while speaking
        bridge.start_listening();
        assert!(!bridge.is_listening());
    }

    #[test]
    fn test_listening_resumes_after_speech_in_conversation_mode() {
        let now = Instant::now();
        let (mut bridge, _feed) = bridge_with_recognition();

        bridge.speak("hola", now);
        // TimedSynthesis finishes well within 10s for one word
        let events = bridge.tick(now + Duration::from_secs(10));
        assert!(events.contains(&BridgeEvent::SpeechFinished));
        assert!(!bridge.is_speaking());
        assert!(bridge.is_listening());
    }

    #[test]
    fn test_listening_stays_off_without_conversation_mode() {
        let now = Instant::now();
        let (rec, _feed) = ChannelRecognition::new();
        let mut bridge = VoiceBridge::new(
            Box::new(TimedSynthesis::new()),
            Box::new(rec),
            "es-ES",
            1.0,
            SILENCE,
            false,
        );

        bridge.speak("hola", now);
        let events = bridge.tick(now + Duration::from_secs(10));
        assert!(events.contains(&BridgeEvent::SpeechFinished));
        assert!(!bridge.is_listening());
    }

    #[test]
    fn test_unavailable_recognition_notifies_once() {
        let now = Instant::now();
        let mut bridge = VoiceBridge::new(
            Box::new(TimedSynthesis::new()),
            Box::new(UnsupportedRecognition::new()),
            "es-ES",
            1.0,
            SILENCE,
            true,
        );

        bridge.start_listening();
        bridge.start_listening();
        let events = bridge.tick(now);
        assert_eq!(
            events,
            vec![BridgeEvent::RecognitionUnavailable(
                RECOGNITION_UNAVAILABLE_NOTICE
            )]
        );
        assert!(!bridge.is_listening());

        // Notice is one-time
        bridge.start_listening();
        assert!(bridge.tick(now).is_empty());
    }

    #[test]
    fn test_absent_synthesis_still_completes() {
        let now = Instant::now();
        let (rec, _feed) = ChannelRecognition::new();
        let mut bridge = VoiceBridge::new(
            Box::new(NullSynthesis::new()),
            Box::new(rec),
            "es-ES",
            1.0,
            SILENCE,
            true,
        );

        bridge.speak("Bienvenido", now);
        let events = bridge.tick(now);
        // Degrades gracefully: completion fires, listening resumes
        assert!(events.contains(&BridgeEvent::SpeechFinished));
        assert!(bridge.is_listening());
    }

    #[test]
    fn test_mode_change_clears_draft() {
        let now = Instant::now();
        let (mut bridge, feed) = bridge_with_recognition();
        bridge.start_listening();

        feed.push("hola");
        bridge.tick(now);

        bridge.set_conversation_mode(false);
        // The pending silence timer must not submit the cleared draft
        let events = bridge.tick(now + Duration::from_secs(5));
        assert!(!events
            .iter()
            .any(|e| matches!(e, BridgeEvent::UtteranceReady(_))));
    }
}
