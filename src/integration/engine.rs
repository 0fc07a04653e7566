//! The widget engine: phase sequencing, voice I/O and message submission
//!
//! Single-threaded and poll-driven. The host calls [`WidgetEngine::tick`]
//! once per frame with the current instant; every delayed action lives in a
//! `TimerSlot` owned here or in a sub-component, so teardown deterministically
//! cancels everything.

use crate::inference::{InferenceCommand, InferenceEvent, InferencePipeline};
use crate::integration::config::WidgetConfig;
use crate::messages::{Message, MessageLog, Sender as MessageSender};
use crate::phases::{Phase, PhaseSequencer};
use crate::speech::{BridgeEvent, SpeechRecognition, SpeechSynthesis, VoiceBridge};
use crate::timing::TimerSlot;
use crate::Result;
use crossbeam_channel::{Receiver, Sender};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Fixed assistant reply used while the inference boundary stays unwired.
pub const CANNED_REPLY: &str =
    "He recibido tu mensaje de voz. Estoy procesando tu solicitud.";

/// Coordinates the phase sequencer, the voice bridge, the conversation log
/// and (optionally) the inference pipeline.
pub struct WidgetEngine {
    config: WidgetConfig,
    sequencer: PhaseSequencer,
    bridge: VoiceBridge,
    log: MessageLog,
    /// In-progress recognized or typed text, shown in the input field
    draft: String,
    /// True between a submission and its reply
    processing: bool,
    /// Simulated processing delay for the canned reply
    reply_timer: TimerSlot,
    /// Prolonged silence in a voice phase falls back to keyboard navigation
    inactivity: TimerSlot,
    inference_tx: Option<Sender<InferenceCommand>>,
    inference_rx: Option<Receiver<InferenceEvent>>,
    pending_request: Option<Uuid>,
    started: bool,
}

impl WidgetEngine {
    /// Create an engine over the given speech capabilities. When
    /// `wire_inference` is set, the inference worker is spawned here.
    pub fn new(
        config: WidgetConfig,
        synthesis: Box<dyn SpeechSynthesis>,
        recognition: Box<dyn SpeechRecognition>,
    ) -> Result<Self> {
        config.validate()?;

        let bridge = VoiceBridge::new(
            synthesis,
            recognition,
            config.locale.clone(),
            config.speech_rate,
            config.silence_window,
            config.conversation_mode,
        );

        let (inference_tx, inference_rx) = if config.wire_inference {
            let pipeline = InferencePipeline::new(config.inference.clone());
            let tx = pipeline.command_sender();
            let rx = pipeline.event_receiver();
            pipeline.start_worker()?;
            info!("Inference boundary wired into the submission flow");
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };

        Ok(Self {
            config,
            sequencer: PhaseSequencer::new(),
            bridge,
            log: MessageLog::new(),
            draft: String::new(),
            processing: false,
            reply_timer: TimerSlot::new(),
            inactivity: TimerSlot::new(),
            inference_tx,
            inference_rx,
            pending_request: None,
            started: false,
        })
    }

    // --- accessors used by the view ---

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn is_listening(&self) -> bool {
        self.bridge.is_listening()
    }

    pub fn is_speaking(&self) -> bool {
        self.bridge.is_speaking()
    }

    pub fn recognition_available(&self) -> bool {
        self.bridge.recognition_available()
    }

    pub fn conversation_mode(&self) -> bool {
        self.bridge.conversation_mode()
    }

    pub fn set_conversation_mode(&mut self, enabled: bool) {
        self.bridge.set_conversation_mode(enabled);
        self.draft.clear();
    }

    // --- lifecycle ---

    /// Enter the introduction phase and speak its narration. Idempotent.
    pub fn start(&mut self, now: Instant) {
        if self.started {
            return;
        }
        self.started = true;
        self.enter_phase(Phase::Introduction, now);
    }

    /// External trigger: an option was selected.
    pub fn select_option(&mut self, now: Instant) {
        self.enter_phase(Phase::OptionSelected, now);
    }

    /// External trigger: voice interaction confirmed.
    pub fn activate_voice(&mut self, now: Instant) {
        self.enter_phase(Phase::VoiceActive, now);
    }

    /// Toggle the listening control.
    pub fn toggle_listening(&mut self, now: Instant) {
        if self.bridge.is_listening() {
            self.bridge.stop_listening();
            self.inactivity.cancel();
        } else {
            self.bridge.start_listening();
            if self.bridge.is_listening() {
                self.inactivity.schedule(now, self.config.inactivity_window);
            }
        }
    }

    /// Submit typed text from the input field.
    pub fn submit_draft(&mut self, now: Instant) {
        let text = std::mem::take(&mut self.draft);
        self.submit_inner(&text, now, false);
    }

    /// Submit arbitrary text as a user message.
    pub fn submit(&mut self, text: &str, now: Instant) {
        self.submit_inner(text, now, false);
    }

    /// Poll timers, speech capabilities and the inference worker.
    pub fn tick(&mut self, now: Instant) {
        // Phase timer
        let before = self.sequencer.phase();
        let narration = self.sequencer.tick(now);
        if self.sequencer.phase() != before {
            self.on_phase_entered(narration, now);
        }

        // Voice bridge
        for event in self.bridge.tick(now) {
            match event {
                BridgeEvent::DraftUpdated(text) => {
                    self.draft = text;
                    if self.sequencer.phase().is_voice_phase() {
                        self.inactivity.schedule(now, self.config.inactivity_window);
                    }
                }
                BridgeEvent::UtteranceReady(text) => {
                    self.submit_inner(&text, now, true);
                }
                BridgeEvent::SpeechFinished => {
                    self.sync_listening(now);
                }
                BridgeEvent::RecognitionUnavailable(notice) => {
                    self.log
                        .append(Message::new(MessageSender::Assistant, notice));
                    if self.sequencer.phase().is_voice_phase() {
                        self.enter_phase(Phase::KeyboardNavigation, now);
                    }
                }
            }
        }

        // Simulated processing delay (unwired mode)
        if self.reply_timer.fire(now) {
            self.deliver_reply(CANNED_REPLY.to_string(), now);
        }

        // Inference worker events (wired mode)
        let events: Vec<InferenceEvent> = match &self.inference_rx {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        };
        for event in events {
            match event {
                InferenceEvent::Reply { text, request_id } => {
                    if self.pending_request == Some(request_id) {
                        self.pending_request = None;
                        self.deliver_reply(text, now);
                    }
                }
                InferenceEvent::Error { error, request_id } => {
                    if request_id.is_none() || request_id == self.pending_request {
                        self.pending_request = None;
                        self.deliver_reply(error, now);
                    }
                }
                InferenceEvent::Shutdown => {
                    debug!("Inference pipeline shut down");
                }
            }
        }

        // Prolonged silence in a voice phase
        if self.inactivity.fire(now)
            && self.sequencer.phase().is_voice_phase()
            && self.bridge.is_listening()
        {
            info!("Prolonged silence, returning to keyboard navigation");
            self.enter_phase(Phase::KeyboardNavigation, now);
        }
    }

    /// Cancel all pending timers and in-flight speech. Called on teardown.
    pub fn shutdown(&mut self) {
        self.sequencer.cancel();
        self.reply_timer.cancel();
        self.inactivity.cancel();
        self.bridge.shutdown();
        if let Some(tx) = &self.inference_tx {
            let _ = tx.send(InferenceCommand::Shutdown);
        }
    }

    // --- internals ---

    fn enter_phase(&mut self, phase: Phase, now: Instant) {
        let narration = self.sequencer.enter(phase, now);
        self.on_phase_entered(narration, now);
    }

    fn on_phase_entered(&mut self, narration: Option<&'static str>, now: Instant) {
        if !self.sequencer.phase().is_voice_phase() {
            self.bridge.stop_listening();
            self.inactivity.cancel();
        }
        if let Some(text) = narration {
            self.bridge.speak(text, now);
        }
        self.sync_listening(now);
    }

    /// Voice phases listen continuously whenever the widget is not talking.
    /// With recognition absent a voice phase cannot function at all, so it
    /// falls back to keyboard navigation; the unavailability notice stays
    /// one-time.
    fn sync_listening(&mut self, now: Instant) {
        if !self.sequencer.phase().is_voice_phase() || self.bridge.is_speaking() {
            return;
        }

        if !self.bridge.recognition_available() {
            // Queues the one-time notice on the first attempt
            self.bridge.start_listening();
            self.enter_phase(Phase::KeyboardNavigation, now);
            return;
        }

        self.bridge.start_listening();
        if self.bridge.is_listening() {
            self.inactivity.schedule(now, self.config.inactivity_window);
        }
    }

    fn submit_inner(&mut self, text: &str, now: Instant, from_voice: bool) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        debug!("Submitting user message ({} chars)", text.len());
        let mut message = Message::new(MessageSender::User, text);
        if from_voice {
            message = message.from_voice();
        }
        self.log.append(message);
        self.draft.clear();
        self.processing = true;

        match &self.inference_tx {
            Some(tx) => {
                let request_id = Uuid::new_v4();
                self.pending_request = Some(request_id);
                if tx
                    .send(InferenceCommand::Generate {
                        prompt: text.to_string(),
                        request_id,
                    })
                    .is_err()
                {
                    warn!("Inference worker gone, falling back to canned reply");
                    self.pending_request = None;
                    self.reply_timer.schedule(now, self.config.reply_delay);
                }
            }
            None => {
                self.reply_timer.schedule(now, self.config.reply_delay);
            }
        }
    }

    fn deliver_reply(&mut self, text: String, now: Instant) {
        self.log
            .append(Message::new(MessageSender::Assistant, text.clone()));
        self.processing = false;
        self.bridge.speak(&text, now);
    }
}

impl Drop for WidgetEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{ChannelRecognition, TimedSynthesis};
    use std::time::Duration;

    fn engine() -> WidgetEngine {
        let (rec, _feed) = ChannelRecognition::new();
        WidgetEngine::new(
            WidgetConfig::default(),
            Box::new(TimedSynthesis::new()),
            Box::new(rec),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_submission_is_ignored() {
        let now = Instant::now();
        let mut engine = engine();
        engine.start(now);

        engine.submit("", now);
        engine.submit("   \t  ", now);
        assert!(engine.log().is_empty());
        assert!(!engine.is_processing());
    }

    #[test]
    fn test_submission_appends_reply_after_delay() {
        let now = Instant::now();
        let mut engine = engine();
        engine.start(now);

        engine.submit("hola", now);
        assert_eq!(engine.log().len(), 1);
        assert_eq!(engine.log().last().unwrap().sender, MessageSender::User);
        assert!(engine.is_processing());

        engine.tick(now + Duration::from_millis(1400));
        assert!(engine.is_processing());
        assert_eq!(engine.log().len(), 1);

        engine.tick(now + Duration::from_millis(1500));
        assert!(!engine.is_processing());
        assert_eq!(engine.log().len(), 2);
        let reply = engine.log().last().unwrap();
        assert_eq!(reply.sender, MessageSender::Assistant);
        assert_eq!(reply.text, CANNED_REPLY);
        // The reply is being spoken
        assert!(engine.is_speaking());
    }

    #[test]
    fn test_typed_draft_submission_clears_draft() {
        let now = Instant::now();
        let mut engine = engine();
        engine.start(now);

        engine.draft_mut().push_str("hola asistente");
        engine.submit_draft(now);
        assert!(engine.draft().is_empty());
        assert_eq!(engine.log().len(), 1);
        assert!(engine.log().last().unwrap().text == "hola asistente");
    }

    #[test]
    fn test_speaking_and_listening_never_overlap() {
        let now = Instant::now();
        let mut engine = engine();
        engine.start(now);

        // Narration is in flight; toggling listening must be suppressed
        assert!(engine.is_speaking());
        engine.toggle_listening(now);
        assert!(!(engine.is_speaking() && engine.is_listening()));

        // After the narration, listening may start
        let later = now + Duration::from_secs(30);
        engine.tick(later);
        engine.toggle_listening(later);
        assert!(!(engine.is_speaking() && engine.is_listening()));
    }

    #[test]
    fn test_voice_activation_starts_listening_silently() {
        let now = Instant::now();
        let mut engine = engine();
        engine.start(now);
        engine.select_option(now);

        // optionSelected (3s) then voiceInstructions (5s) then voiceActivation
        engine.tick(now + Duration::from_millis(3000));
        assert_eq!(engine.phase(), Phase::VoiceInstructions);

        let at_activation = now + Duration::from_millis(8000);
        engine.tick(at_activation);
        assert_eq!(engine.phase(), Phase::VoiceActivation);

        // No narration for voiceActivation; once speech drains, listening runs
        let settled = at_activation + Duration::from_secs(30);
        engine.tick(settled);
        engine.tick(settled);
        assert!(engine.is_listening());
        assert!(!engine.is_speaking());
    }

    #[test]
    fn test_inactivity_returns_to_keyboard_navigation() {
        let now = Instant::now();
        let mut engine = engine();
        engine.start(now);
        engine.activate_voice(now);

        // Let the voiceActive narration finish so listening starts
        let settled = now + Duration::from_secs(30);
        engine.tick(settled);
        assert!(engine.is_listening());

        // 5s with no draft updates falls back
        engine.tick(settled + Duration::from_millis(5000));
        assert_eq!(engine.phase(), Phase::KeyboardNavigation);
        assert!(!engine.is_listening());
    }
}
