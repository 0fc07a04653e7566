//! egui presentation surface for the widget
//!
//! Renders the phase-conditional content blocks, the conversation log and
//! the input controls, and drives the engine's poll loop from the frame
//! loop.

pub mod app;
pub mod components;
pub mod theme;

pub use app::HablaApp;
pub use theme::Theme;
