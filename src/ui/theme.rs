//! Theme and styling for the Habla UI
//!
//! Provides the default dark palette plus a high-contrast variant for the
//! accessibility mode.

use egui::{Color32, Rounding, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Warning color
    pub warning: Color32,
    /// Error color
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Message bubble colors
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,

    /// Listening indicator color
    pub listening: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,
    /// Border radius for message bubbles
    pub bubble_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create the default dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(99, 102, 241),  // Indigo
            warning: Color32::from_rgb(234, 179, 8),   // Yellow
            error: Color32::from_rgb(239, 68, 68),     // Red

            bg_primary: Color32::from_rgb(17, 24, 39),   // Dark blue-gray
            bg_secondary: Color32::from_rgb(31, 41, 55), // Lighter blue-gray
            bg_tertiary: Color32::from_rgb(55, 65, 81),  // Even lighter

            text_primary: Color32::from_rgb(249, 250, 251),   // Almost white
            text_secondary: Color32::from_rgb(209, 213, 219), // Light gray
            text_muted: Color32::from_rgb(156, 163, 175),     // Medium gray

            user_bubble: Color32::from_rgb(99, 102, 241),     // Indigo
            assistant_bubble: Color32::from_rgb(55, 65, 81),  // Gray

            listening: Color32::from_rgb(239, 68, 68), // Red

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),
            bubble_rounding: Rounding::same(12.0),

            spacing: 12.0,
            spacing_lg: 24.0,
            spacing_sm: 6.0,
        }
    }

    /// High-contrast variant for the accessibility mode: pure black
    /// background, white text, yellow accents.
    pub fn high_contrast() -> Self {
        Self {
            primary: Color32::from_rgb(255, 255, 0),
            warning: Color32::from_rgb(255, 165, 0),
            error: Color32::from_rgb(255, 0, 0),

            bg_primary: Color32::BLACK,
            bg_secondary: Color32::from_rgb(20, 20, 20),
            bg_tertiary: Color32::from_rgb(40, 40, 40),

            text_primary: Color32::WHITE,
            text_secondary: Color32::WHITE,
            text_muted: Color32::from_rgb(220, 220, 220),

            user_bubble: Color32::from_rgb(0, 0, 160),
            assistant_bubble: Color32::from_rgb(40, 40, 40),

            listening: Color32::from_rgb(255, 0, 0),

            button_rounding: Rounding::same(4.0),
            card_rounding: Rounding::same(4.0),
            bubble_rounding: Rounding::same(4.0),

            spacing: 12.0,
            spacing_lg: 24.0,
            spacing_sm: 6.0,
        }
    }

    /// Apply the theme to the egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.override_text_color = Some(self.text_primary);
        visuals.selection.bg_fill = self.primary.gamma_multiply(0.4);
        ctx.set_visuals(visuals);
    }
}
