// AgroCast - ui/theme.rs
//
// Colour scheme, risk colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::RiskLevel;
use egui::Color32;

/// Brand green used for headings and primary buttons.
pub const PRIMARY: Color32 = Color32::from_rgb(22, 163, 74); // Green 600

/// Result card accent for a healthy leaf.
pub const HEALTHY: Color32 = Color32::from_rgb(34, 197, 94); // Green 500

/// Result card accent for a detected disease.
pub const DISEASE: Color32 = Color32::from_rgb(220, 38, 38); // Red 600

/// Colour for a risk badge.
pub fn risk_colour(risk: RiskLevel) -> Color32 {
    match risk {
        RiskLevel::Low => Color32::from_rgb(34, 197, 94),     // Green 500
        RiskLevel::Medium => Color32::from_rgb(217, 119, 6),  // Amber 600
        RiskLevel::High => Color32::from_rgb(220, 38, 38),    // Red 600
    }
}

/// Subtle background behind a risk badge.
pub fn risk_bg_colour(risk: RiskLevel) -> Color32 {
    match risk {
        RiskLevel::Low => Color32::from_rgba_premultiplied(34, 197, 94, 30),
        RiskLevel::Medium => Color32::from_rgba_premultiplied(217, 119, 6, 30),
        RiskLevel::High => Color32::from_rgba_premultiplied(220, 38, 38, 30),
    }
}

/// Accent colour for a classification outcome.
pub fn result_colour(is_healthy: bool) -> Color32 {
    if is_healthy {
        HEALTHY
    } else {
        DISEASE
    }
}

/// Apply light/dark visuals and the configured body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        use egui::{FontFamily, FontId, TextStyle};
        style.text_styles = [
            (TextStyle::Heading, FontId::new(font_size * 1.6, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(font_size, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(font_size, FontFamily::Proportional)),
            (TextStyle::Small, FontId::new(font_size * 0.8, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(font_size, FontFamily::Monospace)),
        ]
        .into();
    });
}

/// Layout constants.
pub const CONTENT_MAX_WIDTH: f32 = 720.0;
pub const PREVIEW_BOX: f32 = 320.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
