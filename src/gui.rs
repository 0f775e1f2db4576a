// AgroCast - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and manages the analysis lifecycle.

use crate::app::analysis::AnalysisManager;
use crate::app::state::{AppState, Page};
use crate::ui;
use crate::ui::panels::upload::PreviewTexture;

/// The AgroCast application.
pub struct AgroCastApp {
    pub state: AppState,
    pub analysis_manager: AnalysisManager,
    preview_texture: PreviewTexture,
}

impl AgroCastApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            analysis_manager: AnalysisManager::new(),
            preview_texture: None,
        }
    }
}

impl eframe::App for AgroCastApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for analysis progress
        let messages = self.analysis_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.state.apply_progress(msg);
        }
        // Keep repainting while analysing so the spinner animates and the
        // result appears as soon as it arrives.
        if had_messages || self.state.analysis_in_progress {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                crate::util::constants::ANALYSIS_CANCEL_CHECK_INTERVAL_MS,
            ));
        }

        // ---- Handle flags set by panels ----
        if std::mem::take(&mut self.state.request_analysis) {
            if let Ok(path) = self.state.begin_analysis() {
                let delay = self.state.analysis_delay();
                self.analysis_manager.start_analysis(path, delay);
            }
        }
        if std::mem::take(&mut self.state.request_cancel) {
            self.analysis_manager.cancel_analysis();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui::panels::top_bar::render(ui, &mut self.state);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(&self.state.status_message);
                    // Cancel button visible only while an analysis is running
                    if self.state.analysis_in_progress
                        && ui.small_button(self.state.t("cancel")).clicked()
                    {
                        self.state.request_cancel = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let scans = self.state.history.len();
                        if scans > 0 {
                            ui.label(format!("{scans} scans"));
                        }
                        if !self.state.warnings.is_empty() {
                            ui.label(
                                egui::RichText::new(format!(
                                    "\u{26a0} {}",
                                    self.state.warnings.len()
                                ))
                                .color(egui::Color32::from_rgb(217, 119, 6)),
                            )
                            .on_hover_text(self.state.warnings.join("\n"));
                        }
                    });
                });
            });

        // Central panel (current page)
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.set_max_width(ui::theme::CONTENT_MAX_WIDTH);
                    match self.state.page {
                        Page::Dashboard => ui::panels::dashboard::render(ui, &mut self.state),
                        Page::Upload => ui::panels::upload::render(
                            ui,
                            &mut self.state,
                            &mut self.preview_texture,
                        ),
                    }
                });
        });

        // Dialogs
        ui::panels::history::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }
}
