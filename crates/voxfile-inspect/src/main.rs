//! Command-line inspector for MagicaVoxel `.vox` files.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p voxfile-inspect -- scene.vox` for a summary, or
//! `cargo run -p voxfile-inspect -- --json --voxels scene.vox` for everything.

mod report;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use voxfile_config::{CONFIG_FILE, CliArgs, Config, ConfigError};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let (mut config, loaded) = load_config(&config_dir);
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    voxfile_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    report_config(&config_dir, &loaded);

    let mut failures = 0usize;
    for path in &args.files {
        if let Err(e) = inspect(path, &config) {
            error!(path = %path.display(), "{}", error_chain(e.as_ref()));
            eprintln!("{}: {}", path.display(), error_chain(e.as_ref()));
            failures += 1;
        }
    }

    if failures > 0 {
        warn!(failures, total = args.files.len(), "some files failed to decode");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Where the active configuration came from.
#[derive(Debug)]
enum ConfigSource {
    Loaded,
    Created,
    Defaults(ConfigError),
}

/// Loads `config.ron` from `config_dir`, falling back to defaults on error.
///
/// Runs before logging is initialized, so the outcome is returned and
/// reported by [`report_config`] afterwards.
fn load_config(config_dir: &Path) -> (Config, ConfigSource) {
    let existed = config_dir.join(CONFIG_FILE).exists();
    match Config::load_or_create(config_dir) {
        Ok(config) if existed => (config, ConfigSource::Loaded),
        Ok(config) => (config, ConfigSource::Created),
        Err(e) => (Config::default(), ConfigSource::Defaults(e)),
    }
}

fn report_config(config_dir: &Path, source: &ConfigSource) {
    let path = config_dir.join(CONFIG_FILE);
    match source {
        ConfigSource::Loaded => info!(path = %path.display(), "loaded config"),
        ConfigSource::Created => info!(path = %path.display(), "created default config"),
        ConfigSource::Defaults(e) => {
            warn!(path = %path.display(), "failed to load config, using defaults: {}", error_chain(e));
        }
    }
}

fn inspect(path: &Path, config: &Config) -> Result<(), Box<dyn Error>> {
    let file = voxfile::decode_file_with(path, &config.decode)?;
    info!(
        path = %path.display(),
        voxels = file.voxels.len(),
        custom_palette = file.palette.is_custom(),
        "decoded"
    );
    println!("{}", report::render(path, &file, &config.output)?);
    Ok(())
}

/// Joins an error and all of its sources with `": "`.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
