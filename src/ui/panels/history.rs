// AgroCast - ui/panels/history.rs
//
// Scan history window: every analysis this session, newest first.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the history window (if `state.show_history` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_history {
        return;
    }

    let mut open = true;
    egui::Window::new(state.t("viewHistory"))
        .id(egui::Id::new("history_window"))
        .open(&mut open)
        .collapsible(false)
        .default_width(560.0)
        .show(ctx, |ui| {
            if state.history.is_empty() {
                ui.label(egui::RichText::new(state.t("noScansYet")).weak());
                return;
            }
            ui.label(
                egui::RichText::new(format!(
                    "{} / {}",
                    state.history.len(),
                    state.history.capacity()
                ))
                .small()
                .weak(),
            );
            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                egui::Grid::new("history_grid")
                    .num_columns(4)
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for record in state.history.iter() {
                            ui.label(
                                record
                                    .timestamp
                                    .with_timezone(&chrono::Local)
                                    .format("%Y-%m-%d %H:%M:%S")
                                    .to_string(),
                            );
                            ui.label(record.file_name());
                            ui.label(
                                egui::RichText::new(&record.label)
                                    .color(theme::result_colour(record.is_healthy)),
                            );
                            ui.label(format!("{}%", record.confidence_percent()));
                            ui.end_row();
                        }
                    });
            });
        });

    if !open {
        state.show_history = false;
    }
}
