// AgroCast - ui/panels/upload.rs
//
// Upload page: pick a leaf photo, preview it, run the analysis, and show the
// result card with treatment advice and read-aloud.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants::SUPPORTED_IMAGE_EXTENSIONS;
use std::path::PathBuf;

/// GPU texture for the current preview, tagged with the image it shows.
pub type PreviewTexture = Option<(PathBuf, egui::TextureHandle)>;

/// Render the upload page into the central panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, texture: &mut PreviewTexture) {
    ui.heading(egui::RichText::new(state.t("uploadLeafImage")).color(theme::PRIMARY));
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let choose = ui.add_enabled(
            !state.analysis_in_progress,
            egui::Button::new(format!("\u{1f4c2} {}", state.t("chooseFile"))),
        );
        if choose.clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", SUPPORTED_IMAGE_EXTENSIONS)
                .pick_file()
            {
                // Errors are already reported through the status bar.
                let _ = state.select_image(&path);
            }
        }
        if let Some(image) = &state.selected_image {
            ui.label(egui::RichText::new(&image.file_name).weak());
        }
    });
    ui.add_space(8.0);

    preview(ui, state, texture);
    ui.add_space(8.0);

    if state.analysis_in_progress {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(state.t("analyzing"));
        });
    } else {
        let analyze = ui.add_enabled(
            state.selected_image.is_some(),
            egui::Button::new(
                egui::RichText::new(format!("\u{1f50d} {}", state.t("analyzeLeaf"))).strong(),
            ),
        );
        if analyze.clicked() {
            state.request_analysis = true;
        }
    }
    ui.add_space(12.0);

    result_card(ui, state);
}

fn preview(ui: &mut egui::Ui, state: &AppState, texture: &mut PreviewTexture) {
    let Some(image) = &state.selected_image else {
        *texture = None;
        return;
    };

    let stale = texture.as_ref().map(|(p, _)| p != &image.path).unwrap_or(true);
    if stale {
        *texture = state.preview.as_ref().map(|p| {
            let colour = egui::ColorImage::from_rgba_unmultiplied(
                [p.width as usize, p.height as usize],
                &p.rgba,
            );
            let handle = ui
                .ctx()
                .load_texture("leaf_preview", colour, egui::TextureOptions::LINEAR);
            (image.path.clone(), handle)
        });
    }

    match texture {
        Some((_, handle)) => {
            let size = handle.size_vec2();
            let scale = (theme::PREVIEW_BOX / size.x.max(size.y)).min(1.0);
            ui.add(egui::Image::new((handle.id(), size * scale)));
        }
        None => {
            ui.label(egui::RichText::new(state.t("noPreview")).weak().italics());
        }
    }
}

fn result_card(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(result) = state.last_result.clone() else {
        return;
    };
    let treatment = state.localized_treatment().unwrap_or_default();
    let accent = theme::result_colour(result.is_healthy);
    let mut listen = false;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(state.t("detectionResult"));
        ui.add_space(4.0);

        let headline = if result.is_healthy {
            state.t("healthyPlant")
        } else {
            state.t("diseaseDetected")
        };
        ui.label(egui::RichText::new(headline).color(accent));
        ui.label(egui::RichText::new(&result.label).size(22.0).strong().color(accent));
        ui.horizontal(|ui| {
            ui.label(format!("{}:", state.t("confidence")));
            ui.add(
                egui::ProgressBar::new(result.confidence as f32)
                    .desired_width(160.0)
                    .text(format!("{}%", result.confidence_percent())),
            );
        });

        ui.add_space(8.0);
        ui.strong(state.t("treatment"));
        ui.label(&treatment);
        ui.add_space(6.0);

        let listen_key = if state.language == crate::core::model::Language::Ta {
            "listenInTamil"
        } else {
            "listen"
        };
        if ui
            .add_enabled(
                state.config.speech_enabled,
                egui::Button::new(format!("\u{1f50a} {}", state.t(listen_key))),
            )
            .clicked()
        {
            listen = true;
        }
    });

    if listen {
        // Failures land in the status bar and the warnings list.
        let _ = state.speak_treatment();
    }
}
