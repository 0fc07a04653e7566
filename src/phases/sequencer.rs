//! Guided interaction phases and their timer-driven sequencing
//!
//! The widget walks the user through a fixed sequence of phases. Three of
//! them advance automatically after a fixed dwell time; the rest are steady
//! states that persist until an external trigger. Every phase entry looks up
//! a narration string for speech synthesis.

use crate::timing::TimerSlot;
use std::time::{Duration, Instant};
use tracing::debug;

/// A named step in the guided interaction sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Welcome screen shown on startup
    Introduction,
    /// Steady state: regular chat with keyboard input
    KeyboardNavigation,
    /// An option was selected; brief confirmation before voice instructions
    OptionSelected,
    /// Instructions for enabling voice interaction
    VoiceInstructions,
    /// Steady state: waiting for the user to activate voice input
    VoiceActivation,
    /// Steady state: full voice conversation
    VoiceActive,
}

impl Phase {
    /// The automatic successor and its dwell time, for phases that advance
    /// on a timer. Steady phases return `None`.
    pub fn auto_advance(self) -> Option<(Phase, Duration)> {
        match self {
            Phase::Introduction => {
                Some((Phase::KeyboardNavigation, Duration::from_millis(8000)))
            }
            Phase::OptionSelected => {
                Some((Phase::VoiceInstructions, Duration::from_millis(3000)))
            }
            Phase::VoiceInstructions => {
                Some((Phase::VoiceActivation, Duration::from_millis(5000)))
            }
            Phase::KeyboardNavigation | Phase::VoiceActivation | Phase::VoiceActive => None,
        }
    }

    /// Narration spoken on phase entry. Phases without an entry in the
    /// table are entered silently.
    pub fn narration(self) -> Option<&'static str> {
        match self {
            Phase::Introduction => {
                Some("Bienvenido al Chatbot Accesible. Usa tu voz para interactuar.")
            }
            Phase::KeyboardNavigation => Some(
                "Navegación por voz activada. Usa tu voz para conversar con el asistente.",
            ),
            Phase::OptionSelected => Some(
                "Opción seleccionada. Ahora recibirás instrucciones para el modo de voz.",
            ),
            Phase::VoiceInstructions => Some(
                "Modo de voz activado, di la palabra chatbot tres veces para activar el reconocimiento de voz.",
            ),
            Phase::VoiceActivation => None,
            Phase::VoiceActive => {
                Some("Modo de voz activado, puedes hablar con el asistente.")
            }
        }
    }

    /// Whether this phase listens for continuous speech input.
    pub fn is_voice_phase(self) -> bool {
        matches!(self, Phase::VoiceActivation | Phase::VoiceActive)
    }
}

/// Drives the phase sequence. Owns the single pending phase timer; entering
/// any phase cancels it before scheduling a new one, so transitions can
/// never double-fire.
#[derive(Debug)]
pub struct PhaseSequencer {
    phase: Phase,
    timer: TimerSlot,
}

impl PhaseSequencer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Introduction,
            timer: TimerSlot::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Enter a phase: cancel the pending timer, schedule the automatic
    /// successor where one exists, and return the narration to speak.
    pub fn enter(&mut self, phase: Phase, now: Instant) -> Option<&'static str> {
        debug!("Entering phase {:?}", phase);
        self.phase = phase;
        self.timer.cancel();

        if let Some((_, delay)) = phase.auto_advance() {
            self.timer.schedule(now, delay);
        }

        phase.narration()
    }

    /// Advance to the automatic successor if the phase timer is due,
    /// returning the narration of the newly entered phase.
    pub fn tick(&mut self, now: Instant) -> Option<&'static str> {
        if !self.timer.fire(now) {
            return None;
        }

        match self.phase.auto_advance() {
            Some((next, _)) => self.enter(next, now),
            None => None,
        }
    }

    /// Cancel the pending phase timer (used on teardown).
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    #[cfg(test)]
    fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self::new()
    }
}
