//! Dump subcommand for layerconf
//!
//! Lists every resolved property, optionally interpolated.

use crate::format::OutputFormat;
use clap::Args;

/// Arguments for the dump subcommand
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Resolve ${name} placeholders before printing
    #[arg(short, long)]
    pub interpolate: bool,

    /// Output format: text (default), json, or yaml
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,
}
