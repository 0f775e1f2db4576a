// AgroCast - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Headless classification (--classify / --batch)
// 4. eframe GUI launch

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use agrocast::app;

pub use agrocast::core;
pub use agrocast::platform;
pub use agrocast::ui;
pub use agrocast::util;

use crate::app::batch::BatchLimits;
use crate::app::headless::{HeadlessRequest, Target};
use crate::core::model::Language;
use clap::Parser;
use std::path::PathBuf;

/// Load a system font with Tamil coverage and add it as a fallback.
///
/// The egui built-in fonts have no Tamil glyphs. The first candidate that
/// exists is appended after the defaults so Latin text keeps its usual face.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    let candidates: &[&str] = &[r"C:\Windows\Fonts\Nirmala.ttf", r"C:\Windows\Fonts\latha.ttf"];
    #[cfg(target_os = "macos")]
    let candidates: &[&str] = &[
        "/System/Library/Fonts/Supplemental/Tamil Sangam MN.ttc",
        "/Library/Fonts/NotoSansTamil-Regular.ttf",
    ];
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let candidates: &[&str] = &[
        "/usr/share/fonts/truetype/noto/NotoSansTamil-Regular.ttf",
        "/usr/share/fonts/noto/NotoSansTamil-Regular.ttf",
        "/usr/share/fonts/google-noto/NotoSansTamil-Regular.ttf",
        "/usr/share/fonts/truetype/lohit-tamil/Lohit-Tamil.ttf",
    ];

    for path in candidates {
        match std::fs::read(path) {
            Ok(data) => {
                let mut fonts = egui::FontDefinitions::default();
                fonts
                    .font_data
                    .insert("tamil".to_owned(), egui::FontData::from_owned(data).into());
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    if let Some(list) = fonts.families.get_mut(&family) {
                        list.push("tamil".to_owned());
                    }
                }
                ctx.set_fonts(fonts);
                tracing::info!(font = path, "Tamil font configured");
                return;
            }
            Err(e) => {
                tracing::debug!(font = path, error = %e, "Tamil font candidate unavailable");
            }
        }
    }
    tracing::warn!("No Tamil font found; Tamil text may render as squares");
}

/// AgroCast - Crop disease scouting from leaf photos.
///
/// Launches the desktop app by default. With --classify or --batch, prints
/// results to stdout instead.
#[derive(Parser, Debug)]
#[command(name = "AgroCast", version, about)]
struct Cli {
    /// Leaf image to pre-select (or classify with --classify).
    image: Option<PathBuf>,

    /// Classify IMAGE once and print the result without opening the GUI.
    #[arg(long = "classify", requires = "image", conflicts_with = "batch")]
    classify: bool,

    /// Classify every image under DIR without opening the GUI.
    #[arg(long = "batch", value_name = "DIR")]
    batch: Option<PathBuf>,

    /// Print headless results as JSON.
    #[arg(long = "json")]
    json: bool,

    /// Write headless results to FILE (.csv or .json).
    #[arg(long = "export", value_name = "FILE")]
    export: Option<PathBuf>,

    /// Language for labels and treatment text (en or ta).
    #[arg(short = 'l', long = "lang", value_parser = parse_language)]
    lang: Option<Language>,

    /// Directory containing config.toml (overrides the platform default).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_code(s).ok_or_else(|| format!("unknown language '{s}' (expected en or ta)"))
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths: CLI override > platform default
    let platform_paths = match cli.config_dir.clone() {
        Some(dir) => platform::config::PlatformPaths::with_config_dir(dir),
        None => platform::config::PlatformPaths::resolve(),
    };

    // Config is read first so its [logging] section can configure the subscriber.
    let (mut config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref(), config.log_file.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %platform_paths.config_dir.display(),
        "AgroCast starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Some(lang) = cli.lang {
        config.language = lang;
    }

    let target = match (&cli.batch, cli.classify, &cli.image) {
        (Some(dir), _, _) => Some(Target::Directory(dir.clone())),
        (None, true, Some(image)) => Some(Target::Image(image.clone())),
        _ => None,
    };

    if let Some(target) = target {
        let request = HeadlessRequest {
            target,
            json: cli.json,
            export: cli.export.clone(),
            language: config.language,
            limits: BatchLimits {
                max_depth: config.batch_max_depth,
                max_files: config.batch_max_files,
            },
        };
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match app::headless::run(
            &request,
            &crate::core::classifier::MockClassifier,
            platform::fs::now_millis,
            &mut out,
        ) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    eprintln!("Warning: {warning}");
                }
                tracing::info!(records = outcome.records.len(), "Headless run complete");
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "Headless run failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    if cli.json || cli.export.is_some() {
        tracing::warn!("--json and --export apply only with --classify or --batch; ignoring");
    }

    // Create application state
    let speaker = platform::speech::from_config(
        config.speech_enabled,
        config.speech_command.as_deref(),
        &config.speech_voices,
    );
    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let mut state = app::state::AppState::new(config, config_warnings, speaker);

    // If an image was provided on the CLI, pre-select it on the Upload page
    if let Some(ref path) = cli.image {
        if let Err(e) = state.select_image(path) {
            tracing::warn!(error = %e, "Initial image could not be selected");
        }
    }

    tracing::info!("Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_ID,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::AgroCastApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch AgroCast GUI: {e}");
        std::process::exit(1);
    }
}
