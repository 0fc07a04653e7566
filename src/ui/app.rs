//! Main application struct and eframe integration
//!
//! Owns the widget engine and drives its poll loop from the frame loop.

use crate::integration::{WidgetConfig, WidgetEngine};
use crate::speech::{ChannelRecognition, RecognitionFeed, TimedSynthesis};
use crate::ui::components::{InputBar, MessageList, PhaseBanner};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, TopBottomPanel};
use std::time::{Duration, Instant};

const FONT_SIZE_MIN: f32 = 12.0;
const FONT_SIZE_MAX: f32 = 28.0;
const FONT_SIZE_STEP: f32 = 2.0;

/// Main Habla application
pub struct HablaApp {
    /// Widget engine
    engine: WidgetEngine,
    /// Feed through which the host platform delivers transcript snapshots
    recognition_feed: RecognitionFeed,
    /// Visual theme
    theme: Theme,
    /// Base font size, adjustable from the accessibility controls
    font_size: f32,
    /// High-contrast accessibility mode
    high_contrast: bool,
    /// Whether the engine has been started
    started: bool,
}

impl HablaApp {
    /// Create a new Habla application
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let (recognition, recognition_feed) = ChannelRecognition::new();
        let engine = WidgetEngine::new(
            WidgetConfig::default(),
            Box::new(TimedSynthesis::new()),
            Box::new(recognition),
        )
        .expect("default config is valid");

        Self {
            engine,
            recognition_feed,
            theme,
            font_size: 16.0,
            high_contrast: false,
            started: false,
        }
    }

    /// Handle through which an embedding host pushes transcript snapshots.
    pub fn recognition_feed(&self) -> RecognitionFeed {
        self.recognition_feed.clone()
    }

    fn set_high_contrast(&mut self, ctx: &egui::Context, enabled: bool) {
        self.high_contrast = enabled;
        self.theme = if enabled {
            Theme::high_contrast()
        } else {
            Theme::dark()
        };
        self.theme.apply(ctx);
    }

    /// Show the top header bar with the accessibility controls
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Habla")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("Chatbot accesible")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Accessibility: contrast and font size controls
                        let contrast_label = if self.high_contrast { "◐" } else { "◑" };
                        if ui
                            .button(contrast_label)
                            .on_hover_text("Alternar alto contraste")
                            .clicked()
                        {
                            let enabled = !self.high_contrast;
                            self.set_high_contrast(ctx, enabled);
                        }

                        if ui.button("A+").on_hover_text("Aumentar texto").clicked() {
                            self.font_size = (self.font_size + FONT_SIZE_STEP).min(FONT_SIZE_MAX);
                        }
                        if ui.button("A-").on_hover_text("Reducir texto").clicked() {
                            self.font_size = (self.font_size - FONT_SIZE_STEP).max(FONT_SIZE_MIN);
                        }

                        if self.engine.is_speaking() {
                            ui.label(
                                RichText::new("🔊")
                                    .size(14.0)
                                    .color(self.theme.primary),
                            );
                        }
                    });
                });
            });
    }

    /// Show the bottom input area
    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                InputBar::new(&mut self.engine, &self.theme, self.font_size).show(ui);
            });
    }

    /// Show the main content area: phase banner or message list
    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                let phase = self.engine.phase();
                if PhaseBanner::covers(phase) {
                    PhaseBanner::new(phase, &self.theme, self.font_size).show(ui);
                } else {
                    MessageList::new(&self.engine, &self.theme, self.font_size).show(ui);
                }
            });
    }
}

impl eframe::App for HablaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if !self.started {
            self.started = true;
            self.engine.start(now);
        }

        self.engine.tick(now);

        self.show_header(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // The engine is poll-driven; keep frames coming while timers and
        // speech are pending
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.engine.shutdown();
    }
}
