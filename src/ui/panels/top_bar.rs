// AgroCast - ui/panels/top_bar.rs
//
// Menu bar: File menu (export, exit), page navigation, language selector,
// and the About button.

use crate::app::state::{AppState, Page};
use crate::core::model::Language;
use crate::ui::theme;

/// Render the top bar contents.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui| {
        ui.label(
            egui::RichText::new(format!("\u{1f33f} {}", state.t("appName")))
                .strong()
                .color(theme::PRIMARY),
        );
        ui.separator();

        file_menu(ui, state);

        let (dashboard, upload) = (state.t("dashboard"), state.t("upload"));
        ui.selectable_value(&mut state.page, Page::Dashboard, dashboard);
        ui.selectable_value(&mut state.page, Page::Upload, upload);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{24d8}").on_hover_text(state.t("about")).clicked() {
                state.show_about = true;
            }
            ui.separator();
            language_selector(ui, state);
        });
    });
}

fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(state.t("file"), |ui| {
        // Export is enabled only when there are scans to write.
        let has_scans = !state.history.is_empty();
        ui.add_enabled_ui(has_scans, |ui| {
            if ui.button(state.t("exportHistory")).clicked() {
                if let Some(dest) = rfd::FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .add_filter("JSON", &["json"])
                    .set_file_name("agrocast_scans.csv")
                    .save_file()
                {
                    // Errors are reported through the status bar.
                    let _ = state.export_history(&dest);
                }
                ui.close_menu();
            }
        });
        ui.separator();
        if ui.button(state.t("exit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// One button per language; the active one is highlighted.
fn language_selector(ui: &mut egui::Ui, state: &mut AppState) {
    // Right-to-left layout: iterate in reverse so EN appears first.
    for &language in Language::all().iter().rev() {
        let selected = state.language == language;
        if ui
            .selectable_label(selected, language.selector_label())
            .clicked()
        {
            state.set_language(language);
        }
    }
}
