//! CLI command definitions for layerconf
//!
//! The `Cli` struct holds the options shared by every subcommand: which
//! files make up the layered configuration and where logs go.

pub mod dump;

use clap::{Parser, Subcommand};
use dump::DumpArgs;
use std::path::PathBuf;

/// Default name of the per-user property file.
pub const DEFAULT_HOME_FILE: &str = ".layerconf.properties";

/// Default name of the bundled property resource.
pub const DEFAULT_BUNDLED: &str = "layerconf.properties";

/// Inspect and edit layered property configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the property file in the home directory
    #[arg(long, default_value = DEFAULT_HOME_FILE, global = true)]
    pub home_file: String,

    /// Name of the bundled property resource
    #[arg(short, long, default_value = DEFAULT_BUNDLED, global = true)]
    pub bundled: String,

    /// Home directory (overrides LAYERCONF_HOME_DIR)
    #[arg(long, value_name = "DIR", global = true)]
    pub home_dir: Option<PathBuf>,

    /// Resource directories searched for the bundled file (overrides LAYERCONF_RESOURCE_PATH)
    #[arg(short, long = "resource-dir", value_name = "DIR", global = true)]
    pub resource_dirs: Vec<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every resolved property
    Dump(DumpArgs),

    /// Print the resolved value of one property (exit code 1 if unset)
    Get {
        key: String,

        /// Resolve ${name} placeholders
        #[arg(short, long)]
        interpolate: bool,
    },

    /// Set a property in the home file and save it
    Set { key: String, value: String },
}
