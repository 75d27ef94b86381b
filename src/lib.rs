pub mod error;
pub mod models;
pub mod services;

pub use error::DetectionError;
pub use models::{DetectionResult, ScoreTriple};
pub use services::detection::AiDetector;

use anyhow::Context;
use models::DetectRequest;
use services::config_store::{AppConfig, ConfigStore};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn env_flag(name: &str) -> bool {
    matches!(std::env::var(name).as_deref(), Ok("1") | Ok("true") | Ok("TRUE"))
}

/// Initialize logging: stderr console layer plus a per-session log file.
///
/// stdout is reserved for JSON output, so nothing is logged there.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if env_flag("AIDETECT_DISABLE_FILE_LOG") {
        init_console_only_logging(env_filter);
        return;
    }

    let logs_dir = match std::env::var("AIDETECT_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => get_logs_dir(),
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        init_console_only_logging(env_filter);
        info!(error = %e, "Falling back to console-only logging (log dir not writable)");
        return;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("aidetect_{}.log", timestamp);

    let file_appender = rolling::never(&logs_dir, &log_filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    info!(log_file = %logs_dir.join(&log_filename).display(), version = env!("CARGO_PKG_VERSION"), "logging.initialized");

    if !env_flag("AIDETECT_DISABLE_LOG_CLEANUP") {
        std::thread::spawn(move || cleanup_old_logs(&logs_dir, 30));
    }
}

fn init_console_only_logging(env_filter: EnvFilter) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

fn get_logs_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("aidetect").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn cleanup_old_logs(logs_dir: &PathBuf, keep: usize) {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with("aidetect_") && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return;
    }

    entries.sort_by_key(|e| {
        e.metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
    });

    let remove_count = entries.len().saturating_sub(keep);
    for entry in entries.into_iter().take(remove_count) {
        let _ = fs::remove_file(entry.path());
    }
}

pub fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

pub fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// Load config from `--config-dir <dir>` or the platform default.
pub fn load_config(args: &[String]) -> anyhow::Result<AppConfig> {
    let dir = parse_arg_value(args, "--config-dir")
        .map(PathBuf::from)
        .or_else(ConfigStore::default_config_dir);
    match dir {
        Some(dir) => {
            let store = ConfigStore::new(dir);
            store
                .load()
                .with_context(|| format!("loading {}", store.config_file().display()))
        }
        None => Ok(AppConfig::default()),
    }
}

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != "-" => fs::read_to_string(p).with_context(|| format!("reading {p}")),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

const USAGE: &str = "Usage:\n  aidetect [FILE|-] [--detailed] [--sensitivity low|medium|high] [--config-dir <dir>]\n\n\
Reads text from FILE (or stdin) and prints the verdict as JSON.";

/// Single-text entry point of the `aidetect` binary.
pub fn run() -> anyhow::Result<()> {
    let started = Instant::now();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!("{USAGE}");
        return Ok(());
    }

    init_logging();

    let mut config = load_config(&args)?;
    if let Some(s) = parse_arg_value(&args, "--sensitivity") {
        config.detection.sensitivity = services::DetectionSensitivity::from_str(&s);
    }
    let detector = AiDetector::from_config(&config.detection)?;
    info!(
        sensitivity = ?config.detection.sensitivity,
        threshold = detector.profile().threshold,
        "detector.ready"
    );

    let value_flags = ["--sensitivity", "--config-dir"];
    let input_path = args
        .iter()
        .enumerate()
        .find(|(i, a)| {
            !a.starts_with("--") && !(*i > 0 && value_flags.contains(&args[i - 1].as_str()))
        })
        .map(|(_, a)| a.as_str());

    let request = DetectRequest { text: read_input(input_path)? };
    request.validate(config.detection.max_input_chars)?;

    let output = if has_flag(&args, "--detailed") {
        serde_json::to_string_pretty(&detector.detailed_analysis(&request.text))?
    } else {
        serde_json::to_string_pretty(&detector.detect(&request.text))?
    };
    println!("{output}");

    info!(
        chars = request.text.chars().count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "detect.completed"
    );
    Ok(())
}
