//! Configuration for the widget engine
//!
//! Provides centralized configuration for speech, sequencing and the
//! inference boundary.

use crate::inference::InferenceConfig;
use crate::{HablaError, Result};
use std::time::Duration;

/// Configuration for the complete widget
#[derive(Clone, Debug)]
pub struct WidgetConfig {
    /// BCP 47 locale for recognition and synthesis
    pub locale: String,

    /// Speech synthesis rate (1.0 = normal)
    pub speech_rate: f32,

    /// Pause after the last partial transcript that flushes a submission
    pub silence_window: Duration,

    /// Simulated processing delay before the canned reply (unwired mode)
    pub reply_delay: Duration,

    /// Inactivity in a voice phase before falling back to keyboard navigation
    pub inactivity_window: Duration,

    /// Resume listening automatically after the widget finishes speaking
    pub conversation_mode: bool,

    /// Forward submissions to the inference endpoint instead of the canned reply
    pub wire_inference: bool,

    /// Inference boundary configuration
    pub inference: InferenceConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            locale: "es-ES".to_string(),
            speech_rate: 1.0,
            silence_window: Duration::from_millis(2000),
            reply_delay: Duration::from_millis(1500),
            inactivity_window: Duration::from_millis(5000),
            conversation_mode: true,
            wire_inference: false,
            inference: InferenceConfig::default(),
        }
    }
}

impl WidgetConfig {
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_speech_rate(mut self, rate: f32) -> Self {
        self.speech_rate = rate;
        self
    }

    pub fn with_silence_window(mut self, window: Duration) -> Self {
        self.silence_window = window;
        self
    }

    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn with_inactivity_window(mut self, window: Duration) -> Self {
        self.inactivity_window = window;
        self
    }

    pub fn without_conversation_mode(mut self) -> Self {
        self.conversation_mode = false;
        self
    }

    /// Wire submissions into the inference boundary.
    pub fn with_inference(mut self, inference: InferenceConfig) -> Self {
        self.wire_inference = true;
        self.inference = inference;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.locale.is_empty() {
            return Err(HablaError::ConfigError("locale is required".to_string()));
        }
        if self.speech_rate <= 0.0 {
            return Err(HablaError::ConfigError(
                "speech rate must be positive".to_string(),
            ));
        }
        if self.silence_window.is_zero() {
            return Err(HablaError::ConfigError(
                "silence window must be non-zero".to_string(),
            ));
        }
        if self.wire_inference {
            self.inference.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.locale, "es-ES");
        assert_eq!(config.silence_window, Duration::from_millis(2000));
        assert_eq!(config.reply_delay, Duration::from_millis(1500));
        assert!(config.conversation_mode);
        assert!(!config.wire_inference);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(WidgetConfig::default().with_locale("").validate().is_err());
        assert!(WidgetConfig::default()
            .with_speech_rate(0.0)
            .validate()
            .is_err());
        assert!(WidgetConfig::default()
            .with_silence_window(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_wired_config_validates_inference() {
        let config = WidgetConfig::default()
            .with_inference(InferenceConfig::default().with_endpoint(""));
        assert!(config.validate().is_err());
    }
}
