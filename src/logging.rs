use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

const LOG_LEVEL_ENV: &str = "KANBAN_PANEL_LOG_LEVEL";
/// Level for drag gesture and persistence events, independent of the rest.
const PANEL_LOG_LEVEL_ENV: &str = "KANBAN_PANEL_GESTURE_LOG_LEVEL";
const LOG_FILE_PREFIX: &str = "kanban-panel-";
const PANEL_TARGET: &str = "kanban_panel::panel";

pub fn init_logging() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = get_log_directory()?;
    fs::create_dir_all(&log_dir)?;

    let log_file_path = get_log_file_path(&log_dir);

    let file = fs::File::create(&log_file_path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // The writer must outlive every log call, including the panic hook.
    std::mem::forget(guard);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(build_log_filter())
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized. Log file: {}", log_file_path.display());

    Ok(log_file_path)
}

fn build_log_filter() -> EnvFilter {
    let level = env_log_level(LOG_LEVEL_ENV).unwrap_or("warn");
    let panel_level = env_log_level(PANEL_LOG_LEVEL_ENV);
    EnvFilter::new(filter_directives(level, panel_level))
}

fn env_log_level(var: &str) -> Option<&'static str> {
    std::env::var(var)
        .ok()
        .and_then(|raw| normalize_log_level(raw.as_str()))
}

fn filter_directives(level: &str, panel_level: Option<&str>) -> String {
    let panel_level = panel_level.unwrap_or(level);
    format!("{level},kanban_panel={level},{PANEL_TARGET}={panel_level}")
}

/// Records where panel state and settings come from for this session.
pub fn log_panel_session(settings: &Settings, store_path: Option<&Path>) {
    let config_path = Settings::config_path();
    info!(
        settings = %config_path.as_deref().map_or_else(|| "<none>".into(), Path::to_string_lossy),
        store = %store_path.map_or_else(|| "<default>".into(), Path::to_string_lossy),
        storage_key = %settings.storage_key,
        min_width = settings.min_width,
        default_width = settings.default_width,
        side_by_side_min_width = settings.side_by_side_min_width,
        "panel session configured"
    );
}

fn normalize_log_level(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

pub fn get_log_directory() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir = dirs::data_local_dir().ok_or("Failed to determine local data directory")?;
    Ok(data_dir.join("kanban-panel").join("logs"))
}

pub fn get_log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    log_dir.join(format!("{LOG_FILE_PREFIX}{timestamp}.log"))
}

pub fn print_log_location(log_path: &Path) {
    println!();
    println!("  Log file: {}", log_path.display());
    println!();
}
