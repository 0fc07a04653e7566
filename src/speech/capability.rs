//! Platform speech capabilities as narrow trait seams
//!
//! The host platform may or may not provide speech synthesis and speech
//! recognition. Both are modelled as traits with a "present" and an "absent"
//! implementation chosen at startup, so the rest of the widget never
//! branches on capability availability.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::debug;

/// One utterance handed to the synthesis capability.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub text: String,
    /// BCP 47 locale tag, e.g. `es-ES`
    pub locale: String,
    /// Speaking rate multiplier (1.0 = normal)
    pub rate: f32,
}

/// Text-to-speech capability: one utterance at a time, completion observed
/// by polling.
pub trait SpeechSynthesis: Send {
    /// Begin synthesizing an utterance, replacing any in-flight one.
    fn start(&mut self, utterance: Utterance, now: Instant);

    /// Cancel the in-flight utterance, if any. Cancelled utterances never
    /// report completion.
    fn cancel(&mut self);

    /// Returns true exactly once when the current utterance finishes
    /// naturally.
    fn poll_finished(&mut self, now: Instant) -> bool;

    fn is_available(&self) -> bool {
        true
    }
}

/// Continuous speech-to-text capability delivering cumulative transcript
/// snapshots.
pub trait SpeechRecognition: Send {
    /// Begin continuous recognition in the given locale. Idempotent.
    fn start(&mut self, locale: &str);

    /// Stop recognition. Idempotent.
    fn stop(&mut self);

    /// Clear the accumulated transcript.
    fn reset(&mut self);

    /// The latest cumulative transcript snapshot, if it changed since the
    /// previous poll.
    fn poll_partial(&mut self) -> Option<String>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Present synthesis capability that models speaking time from text length
/// and rate. Hosts with real audio output substitute their own
/// implementation of the trait.
pub struct TimedSynthesis {
    /// Words per minute at rate 1.0
    words_per_minute: f32,
    deadline: Option<Instant>,
}

impl TimedSynthesis {
    const DEFAULT_WPM: f32 = 170.0;
    const MIN_UTTERANCE: Duration = Duration::from_millis(400);

    pub fn new() -> Self {
        Self {
            words_per_minute: Self::DEFAULT_WPM,
            deadline: None,
        }
    }

    pub fn with_words_per_minute(mut self, wpm: f32) -> Self {
        self.words_per_minute = wpm.max(1.0);
        self
    }

    fn estimate_duration(&self, utterance: &Utterance) -> Duration {
        let words = utterance.text.split_whitespace().count().max(1);
        let wpm = self.words_per_minute * utterance.rate.max(0.1);
        let secs = words as f32 * 60.0 / wpm;
        Duration::from_secs_f32(secs).max(Self::MIN_UTTERANCE)
    }
}

impl Default for TimedSynthesis {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesis for TimedSynthesis {
    fn start(&mut self, utterance: Utterance, now: Instant) {
        let duration = self.estimate_duration(&utterance);
        debug!(
            "Synthesizing {} chars (~{:.1}s): {}",
            utterance.text.len(),
            duration.as_secs_f32(),
            utterance.text
        );
        self.deadline = Some(now + duration);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn poll_finished(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Absent synthesis capability. Utterances complete on the next poll so
/// completion-driven flows still run; nothing is spoken and no error is
/// surfaced.
#[derive(Debug, Default)]
pub struct NullSynthesis {
    pending: bool,
}

impl NullSynthesis {
    pub fn new() -> Self {
        Self { pending: false }
    }
}

impl SpeechSynthesis for NullSynthesis {
    fn start(&mut self, _utterance: Utterance, _now: Instant) {
        self.pending = true;
    }

    fn cancel(&mut self) {
        self.pending = false;
    }

    fn poll_finished(&mut self, _now: Instant) -> bool {
        std::mem::take(&mut self.pending)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Handle the host platform uses to feed cumulative transcript snapshots
/// into a [`ChannelRecognition`].
#[derive(Debug, Clone)]
pub struct RecognitionFeed {
    tx: Sender<String>,
}

impl RecognitionFeed {
    /// Push a new cumulative transcript snapshot. Snapshots arriving after
    /// the recognizer is gone are dropped.
    pub fn push(&self, transcript: impl Into<String>) {
        if self.tx.send(transcript.into()).is_err() {
            debug!("Recognition feed disconnected, dropping snapshot");
        }
    }
}

/// Present recognition capability backed by a channel of transcript
/// snapshots from the host platform.
pub struct ChannelRecognition {
    rx: Receiver<String>,
    active: bool,
    transcript: String,
}

impl ChannelRecognition {
    pub fn new() -> (Self, RecognitionFeed) {
        let (tx, rx) = unbounded();
        (
            Self {
                rx,
                active: false,
                transcript: String::new(),
            },
            RecognitionFeed { tx },
        )
    }
}

impl SpeechRecognition for ChannelRecognition {
    fn start(&mut self, locale: &str) {
        if !self.active {
            debug!("Recognition started (locale {})", locale);
            self.active = true;
        }
    }

    fn stop(&mut self) {
        if self.active {
            debug!("Recognition stopped");
            self.active = false;
        }
    }

    fn reset(&mut self) {
        self.transcript.clear();
        // Discard snapshots from before the reset
        while self.rx.try_recv().is_ok() {}
    }

    fn poll_partial(&mut self) -> Option<String> {
        if !self.active {
            return None;
        }

        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }

        match latest {
            Some(snapshot) if snapshot != self.transcript => {
                self.transcript = snapshot.clone();
                Some(snapshot)
            }
            _ => None,
        }
    }
}

/// Absent recognition capability.
#[derive(Debug, Default)]
pub struct UnsupportedRecognition;

impl UnsupportedRecognition {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechRecognition for UnsupportedRecognition {
    fn start(&mut self, _locale: &str) {}

    fn stop(&mut self) {}

    fn reset(&mut self) {}

    fn poll_partial(&mut self) -> Option<String> {
        None
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(text: &str) -> Utterance {
        Utterance {
            text: text.to_string(),
            locale: "es-ES".to_string(),
            rate: 1.0,
        }
    }

    #[test]
    fn test_timed_synthesis_completes_after_estimate() {
        let now = Instant::now();
        let mut tts = TimedSynthesis::new().with_words_per_minute(60.0);
        // 2 words at 60 wpm = 2 seconds
        tts.start(utterance("hola asistente"), now);

        assert!(!tts.poll_finished(now + Duration::from_millis(1900)));
        assert!(tts.poll_finished(now + Duration::from_millis(2000)));
        // Completion is reported exactly once
        assert!(!tts.poll_finished(now + Duration::from_secs(10)));
    }

    #[test]
    fn test_timed_synthesis_cancel_suppresses_completion() {
        let now = Instant::now();
        let mut tts = TimedSynthesis::new();
        tts.start(utterance("hola"), now);
        tts.cancel();
        assert!(!tts.poll_finished(now + Duration::from_secs(60)));
    }

    #[test]
    fn test_null_synthesis_completes_immediately() {
        let now = Instant::now();
        let mut tts = NullSynthesis::new();
        assert!(!tts.is_available());
        tts.start(utterance("hola"), now);
        assert!(tts.poll_finished(now));
        assert!(!tts.poll_finished(now));
    }

    #[test]
    fn test_channel_recognition_delivers_latest_snapshot() {
        let (mut rec, feed) = ChannelRecognition::new();
        rec.start("es-ES");

        feed.push("ho");
        feed.push("hola");
        // Only the newest snapshot is reported
        assert_eq!(rec.poll_partial().as_deref(), Some("hola"));
        // Unchanged transcript is not re-reported
        feed.push("hola");
        assert!(rec.poll_partial().is_none());
    }

    #[test]
    fn test_channel_recognition_ignores_input_while_stopped() {
        let (mut rec, feed) = ChannelRecognition::new();
        feed.push("hola");
        assert!(rec.poll_partial().is_none());

        rec.start("es-ES");
        assert_eq!(rec.poll_partial().as_deref(), Some("hola"));

        rec.stop();
        feed.push("hola asistente");
        assert!(rec.poll_partial().is_none());
    }

    #[test]
    fn test_channel_recognition_reset_discards_buffered() {
        let (mut rec, feed) = ChannelRecognition::new();
        rec.start("es-ES");
        feed.push("hola");
        rec.reset();
        assert!(rec.poll_partial().is_none());
    }

    #[test]
    fn test_feed_push_after_recognizer_dropped() {
        let (rec, feed) = ChannelRecognition::new();
        drop(rec);
        feed.push("hola");
    }

    #[test]
    fn test_unsupported_recognition() {
        let mut rec = UnsupportedRecognition::new();
        assert!(!rec.is_available());
        rec.start("es-ES");
        assert!(rec.poll_partial().is_none());
    }
}
