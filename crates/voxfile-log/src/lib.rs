//! Structured logging for the voxfile tools.
//!
//! Console output goes to stderr so it never mixes with decoded reports on
//! stdout. Debug builds can additionally write JSON lines to a log file.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use voxfile_config::Config;

/// Filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written inside the log directory.
pub const LOG_FILE: &str = "voxfile.log";

/// Initialize the global tracing subscriber.
///
/// - Console layer on stderr with uptime timestamps and targets.
/// - JSON file layer in `log_dir` when `debug_build` is set and the config
///   enables `log_to_file`.
/// - `RUST_LOG` overrides the config's `debug.log_level`.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
///
/// # Examples
///
/// ```no_run
/// use voxfile_config::Config;
/// use voxfile_log::init_logging;
///
/// init_logging(None, false, None);
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = config
        .map(|c| c.debug.log_level.as_str())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let wants_file = debug_build && config.is_some_and(|c| c.debug.log_to_file);
    if wants_file
        && let Some(log_dir) = log_dir
        && let Some(log_file) = open_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        if let Err(e) = subscriber.with(file_layer).try_init() {
            tracing::debug!(error = %e, "global subscriber already set; keeping it");
        }
        return;
    }

    if let Err(e) = subscriber.try_init() {
        tracing::debug!(error = %e, "global subscriber already set; keeping it");
    }
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// Creates `log_dir` and truncates `voxfile.log` inside it.
fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE)).ok()
}
