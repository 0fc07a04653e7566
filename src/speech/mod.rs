//! Speech I/O: platform capability traits and the voice bridge
//!
//! This module provides:
//! - Narrow capability traits for speech synthesis and recognition, with
//!   present/absent implementations selected at startup
//! - The voice bridge that converts continuous recognition into discrete
//!   submitted utterances via a silence debounce

pub mod bridge;
pub mod capability;

pub use bridge::{BridgeEvent, VoiceBridge, RECOGNITION_UNAVAILABLE_NOTICE};
pub use capability::{
    ChannelRecognition, NullSynthesis, RecognitionFeed, SpeechRecognition, SpeechSynthesis,
    TimedSynthesis, UnsupportedRecognition, Utterance,
};
