//! Phase-conditional content blocks
//!
//! The introduction and voice-instructions phases replace the chat area
//! with a full banner; the remaining phases render nothing here.

use crate::phases::Phase;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Banner shown for phases with dedicated screen content
pub struct PhaseBanner<'a> {
    phase: Phase,
    theme: &'a Theme,
    font_size: f32,
}

impl<'a> PhaseBanner<'a> {
    pub fn new(phase: Phase, theme: &'a Theme, font_size: f32) -> Self {
        Self {
            phase,
            theme,
            font_size,
        }
    }

    /// Whether this phase replaces the chat area with a banner.
    pub fn covers(phase: Phase) -> bool {
        matches!(phase, Phase::Introduction | Phase::VoiceInstructions)
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let (title, lines): (&str, &[&str]) = match self.phase {
            Phase::Introduction => (
                "Bienvenido al Chatbot Accesible",
                &[
                    "Para navegar utiliza tu voz",
                    "El sistema te guiará paso a paso en la interacción",
                ],
            ),
            Phase::VoiceInstructions => (
                "Modo de Voz Activado",
                &[
                    "Ahora puedes interactuar por voz",
                    "Di \"chatbot\" tres veces para comenzar",
                ],
            ),
            _ => return,
        };

        ui.vertical_centered(|ui| {
            ui.add_space(120.0);

            ui.label(
                RichText::new(title)
                    .size(self.font_size * 1.6)
                    .strong()
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing_lg);

            for line in lines {
                ui.label(
                    RichText::new(*line)
                        .size(self.font_size)
                        .color(self.theme.text_secondary),
                );
                ui.add_space(self.theme.spacing_sm);
            }
        });
    }
}
