//! Logging setup for glance with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if requested).
//! Stdout logging is enabled when `GLANCE_LOG` or `RUST_LOG` is set, or in
//! debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`GLANCE_LOG`** (highest priority) - glance-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for glance crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/glance/logs/glance-<pid>.log`, overridable
//! with `--log-file <path>`.

use std::{env, path::PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Crates covered by the default and expanded filters.
const CRATES: &[&str] = &["glance", "glance_log", "glance_bin"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Respects the environment variable priority described in the module docs:
/// `GLANCE_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
///
/// Safe to call multiple times -- will not crash if logging is already
/// initialized.
pub fn init(config: LogConfig) -> Result<LogGuard, Box<dyn std::error::Error + Send + Sync>> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter());

    let stdout_enabled =
        env::var("GLANCE_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let stdout_layer = if stdout_enabled {
        Some(fmt::layer().with_filter(stdout_filter()))
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize stdout-only logging for tests.
///
/// Will not crash if called multiple times or if logging is already
/// initialized by another test.
pub fn test() {
    let _ = fmt().with_env_filter(stdout_filter()).try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("glance-{}.log", std::process::id());

    if let Some(path) = override_path {
        // A path with an extension names the file itself; otherwise it names
        // the directory to put the default filename in.
        if path.extension().is_some() {
            let dir = path
                .parent()
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("glance")
        .join("logs");

    (dir, filename)
}

/// File filter: user-specified level if set, otherwise `warn`.
fn file_filter() -> EnvFilter {
    if env::var("GLANCE_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return stdout_filter();
    }
    EnvFilter::new("warn")
}

/// Filter based on environment variables: `GLANCE_LOG` > `RUST_LOG` >
/// defaults.
fn stdout_filter() -> EnvFilter {
    if let Ok(glance_log) = env::var("GLANCE_LOG") {
        return expand_glance_log(&glance_log);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(crate_filter("info"))
}

/// Expand a bare `GLANCE_LOG` level into per-crate directives.
///
/// `GLANCE_LOG=debug` becomes `warn,glance=debug,...`; values that already
/// contain directive syntax (`=`, `:`, `,`) are used as-is.
fn expand_glance_log(glance_log: &str) -> EnvFilter {
    if glance_log.contains('=') || glance_log.contains(':') || glance_log.contains(',') {
        return EnvFilter::new(glance_log);
    }
    EnvFilter::new(crate_filter(glance_log))
}

fn crate_filter(level: &str) -> String {
    let mut filter = String::from("warn");
    for name in CRATES {
        filter.push_str(&format!(",{name}={level}"));
    }
    filter
}
