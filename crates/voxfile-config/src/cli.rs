//! Command-line arguments for the voxfile tools.

use std::path::PathBuf;

use clap::Parser;
use voxfile::PaletteMode;

use crate::{Config, OutputFormat};

/// Decode MagicaVoxel `.vox` files and print what they contain.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "voxfile-inspect", about = "Inspect MagicaVoxel .vox files")]
pub struct CliArgs {
    /// Files to decode.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print JSON instead of a text summary.
    #[arg(long)]
    pub json: bool,

    /// List every voxel.
    #[arg(long)]
    pub voxels: bool,

    /// Ignore custom RGBA palettes and always report the default one.
    #[arg(long)]
    pub always_default_palette: bool,

    /// Fail on files without a SIZE chunk.
    #[arg(long)]
    pub require_size: bool,

    /// Log level (error, warn, info, debug, trace) or a full filter string.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Boolean flags only ever switch a setting on; leaving a flag out keeps
    /// the value from the file.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if args.json {
            self.output.format = OutputFormat::Json;
        }
        if args.voxels {
            self.output.list_voxels = true;
        }
        if args.always_default_palette {
            self.decode.palette = PaletteMode::AlwaysDefault;
        }
        if args.require_size {
            self.decode.require_size = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
