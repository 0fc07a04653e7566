//! Message list component
//!
//! Displays the conversation history with sender labels, voice markers and
//! the processing indicator.

use crate::integration::WidgetEngine;
use crate::messages::{Message, Sender};
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText};

/// Scrolling conversation view
pub struct MessageList<'a> {
    engine: &'a WidgetEngine,
    theme: &'a Theme,
    font_size: f32,
}

impl<'a> MessageList<'a> {
    pub fn new(engine: &'a WidgetEngine, theme: &'a Theme, font_size: f32) -> Self {
        Self {
            engine,
            theme,
            font_size,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let messages = self.engine.log().snapshot();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    if messages.is_empty() && !self.engine.is_processing() {
                        self.show_empty_state(ui);
                    } else {
                        for message in &messages {
                            self.show_message(ui, message);
                            ui.add_space(self.theme.spacing_sm);
                        }

                        if self.engine.is_processing() {
                            self.show_processing_indicator(ui);
                        }
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.label(
                RichText::new("Chat con el asistente accesible")
                    .size(self.font_size * 1.4)
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            ui.label(
                RichText::new("Escribe un mensaje o usa tu voz para comenzar.")
                    .size(self.font_size)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = matches!(message.sender, Sender::User);
        let bubble_color = if is_user {
            self.theme.user_bubble
        } else {
            self.theme.assistant_bubble
        };

        let text_color = if is_user {
            Color32::WHITE
        } else {
            self.theme.text_primary
        };

        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            // Sender label, with a voice marker for spoken submissions
            let sender_label = match (is_user, message.from_voice) {
                (true, true) => "🎤 Tú",
                (true, false) => "Tú",
                (false, _) => "Asistente",
            };
            ui.label(
                RichText::new(sender_label)
                    .size(self.font_size * 0.8)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(
                        RichText::new(&message.text)
                            .size(self.font_size)
                            .color(text_color),
                    );
                });

            let time_str = message.timestamp.format("%H:%M").to_string();
            ui.label(
                RichText::new(time_str)
                    .size(self.font_size * 0.7)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_processing_indicator(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(Align::LEFT), |ui| {
            egui::Frame::none()
                .fill(self.theme.assistant_bubble)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("procesando")
                                .size(self.font_size * 0.9)
                                .color(self.theme.text_muted),
                        );
                        let t = ui.ctx().input(|i| i.time);
                        for i in 0..3 {
                            let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                            ui.label(
                                RichText::new("●")
                                    .size(self.font_size * 0.6)
                                    .color(self.theme.text_muted.gamma_multiply(alpha)),
                            );
                        }
                    });
                });
        });

        // Keep the dots animating
        ui.ctx().request_repaint();
    }
}
