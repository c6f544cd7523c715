//! Configuration for the voxfile tools.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap. Decoder behavior is configured through the
//! embedded [`voxfile::DecodeOptions`].

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, OutputConfig, OutputFormat};
pub use error::ConfigError;
