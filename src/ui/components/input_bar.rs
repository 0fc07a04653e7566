//! Input bar component
//!
//! Text input with submit-on-enter, the listening toggle and the send
//! button. While the widget listens, the input shows the recognized draft.

use crate::integration::WidgetEngine;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};
use std::time::Instant;

/// Input bar for text and voice input
pub struct InputBar<'a> {
    engine: &'a mut WidgetEngine,
    theme: &'a Theme,
    font_size: f32,
}

impl<'a> InputBar<'a> {
    pub fn new(engine: &'a mut WidgetEngine, theme: &'a Theme, font_size: f32) -> Self {
        Self {
            engine,
            theme,
            font_size,
        }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                if !self.engine.recognition_available() {
                    ui.label(
                        RichText::new("El reconocimiento de voz no está disponible")
                            .size(self.font_size * 0.8)
                            .color(self.theme.warning),
                    );
                    ui.add_space(self.theme.spacing_sm);
                }

                ui.horizontal(|ui| {
                    self.show_listening_toggle(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_text_input(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_send_button(ui);
                });
            });
    }

    fn show_listening_toggle(&mut self, ui: &mut egui::Ui) {
        let listening = self.engine.is_listening();

        let (label, color) = if listening {
            ("Escuchando…", self.theme.listening)
        } else {
            ("🎤 Hablar", self.theme.text_secondary)
        };

        let button = egui::Button::new(
            RichText::new(label)
                .size(self.font_size * 0.9)
                .color(color),
        )
        .min_size(Vec2::new(110.0, 44.0))
        .rounding(self.theme.button_rounding);

        let button = if listening {
            button.fill(self.theme.listening.gamma_multiply(0.2))
        } else {
            button
        };

        let response = ui.add(button);

        if response.clicked() {
            self.engine.toggle_listening(Instant::now());
        }

        // Pulsing ring while listening
        if listening {
            let t = ui.ctx().input(|i| i.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

            let painter = ui.painter();
            let rect = response.rect;
            painter.rect_stroke(
                rect.expand(2.0 + pulse * 3.0),
                self.theme.button_rounding,
                egui::Stroke::new(
                    2.0 * pulse,
                    self.theme.listening.gamma_multiply(1.0 - pulse * 0.5),
                ),
            );

            ui.ctx().request_repaint();
        }

        response.on_hover_text(if listening {
            "Detener escucha"
        } else {
            "Iniciar escucha"
        });
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let processing = self.engine.is_processing();
        let listening = self.engine.is_listening();

        // Reserve space for the send button
        let available_width = ui.available_width() - 60.0;

        let text_edit = egui::TextEdit::singleline(self.engine.draft_mut())
            .hint_text("Escribe tu mensaje")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        // While listening the field displays the recognized draft read-only
        let response = ui.add_enabled(!processing && !listening, text_edit);

        if response.has_focus() && !self.engine.draft().trim().is_empty() {
            let enter_pressed = ui.input(|i| i.key_pressed(Key::Enter));
            if enter_pressed {
                self.engine.submit_draft(Instant::now());
            }
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let can_send = !self.engine.draft().trim().is_empty() && !self.engine.is_processing();

        let button_color = if can_send {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(
            RichText::new("➤")
                .size(self.font_size)
                .color(egui::Color32::WHITE),
        )
        .min_size(Vec2::splat(44.0))
        .rounding(self.theme.button_rounding)
        .fill(button_color);

        let response = ui.add_enabled(can_send, button);

        if response.clicked() {
            self.engine.submit_draft(Instant::now());
        }

        response.on_hover_text("Enviar mensaje (Enter)");
    }
}
