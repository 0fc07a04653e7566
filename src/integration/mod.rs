//! Integration layer tying the sequencer, voice bridge, conversation log
//! and inference boundary into one poll-driven widget engine.

pub mod config;
pub mod engine;

pub use config::WidgetConfig;
pub use engine::{WidgetEngine, CANNED_REPLY};
