// AgroCast - ui/panels/dashboard.rs
//
// Dashboard page: welcome header, quick actions, weather card with the
// disease risk badge, and the most recent scans.

use crate::app::state::{AppState, Page};
use crate::ui::theme;
use crate::util::constants::DASHBOARD_RECENT_SCANS;

/// Render the dashboard into the central panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let welcome = match &state.config.display_name {
        Some(name) => format!("{}, {name}!", state.t("welcomeBack")),
        None => format!("{}!", state.t("welcomeBack")),
    };
    ui.heading(egui::RichText::new(welcome).color(theme::PRIMARY));
    ui.label(egui::RichText::new(state.t("tagline")).weak());
    ui.add_space(12.0);

    // Quick actions
    ui.horizontal(|ui| {
        if ui.button(format!("\u{1f4f7} {}", state.t("uploadNewImage"))).clicked() {
            state.page = Page::Upload;
        }
        if ui.button(format!("\u{1f4cb} {}", state.t("viewHistory"))).clicked() {
            state.show_history = true;
        }
    });
    ui.add_space(12.0);

    weather_card(ui, state);
    ui.add_space(12.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(state.t("recentScans"));
        ui.add_space(4.0);
        if state.history.is_empty() {
            ui.label(egui::RichText::new(state.t("noScansYet")).weak());
            return;
        }
        for record in state.history.recent(DASHBOARD_RECENT_SCANS) {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("\u{25cf}").color(theme::result_colour(record.is_healthy)),
                );
                ui.label(record.file_name());
                ui.label(egui::RichText::new(&record.label).strong());
                ui.label(format!("{}%", record.confidence_percent()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(
                            record
                                .timestamp
                                .with_timezone(&chrono::Local)
                                .format("%Y-%m-%d %H:%M")
                                .to_string(),
                        )
                        .weak(),
                    );
                });
            });
        }
    });
}

fn weather_card(ui: &mut egui::Ui, state: &mut AppState) {
    let mut refresh = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.strong(state.t("weatherForecast"));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button(state.t("refresh")).clicked() {
                    refresh = true;
                }
            });
        });
        ui.label(egui::RichText::new(&state.weather.description).weak());
        ui.add_space(4.0);

        egui::Grid::new("weather_grid")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                ui.label(state.t("temperature"));
                ui.label(format!("{:.0} \u{b0}C", state.weather.temperature_c));
                ui.end_row();
                ui.label(state.t("humidity"));
                ui.label(format!("{:.0} %", state.weather.humidity_pct));
                ui.end_row();
                ui.label(state.t("windSpeed"));
                ui.label(format!("{:.0} km/h", state.weather.wind_speed_kmh));
                ui.end_row();
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let risk = state.weather.risk_level;
            ui.label(state.t("diseaseRiskLevel"));
            ui.label(
                egui::RichText::new(format!(" {} ", state.t(risk.translation_key())))
                    .strong()
                    .color(theme::risk_colour(risk))
                    .background_color(theme::risk_bg_colour(risk)),
            );
        });
    });

    if refresh {
        state.refresh_weather();
    }
}
