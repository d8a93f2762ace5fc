//! layerconf command-line tool
//!
//! Opens the layered configuration (system, home file, bundled resource)
//! and dumps, reads or writes properties.

use anyhow::{Context, Result};
use clap::Parser;
use layerconf::cli::{Cli, Command};
use layerconf::format::render;
use layerconf::logging::{self, LogTarget};
use layerconf::{ConfigPaths, LayeredConfig, LayeredOptions, PropertySource, TypedAccess};
use std::process::ExitCode;
use tracing::{debug, info};

fn open_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut paths = ConfigPaths::discover();
    if let Some(dir) = &cli.home_dir {
        paths.home_dir = Some(dir.clone());
    }
    if !cli.resource_dirs.is_empty() {
        paths.resource_dirs = cli.resource_dirs.clone();
    }
    debug!("Config paths: {:?}", paths);

    LayeredOptions::new(&cli.home_file, &cli.bundled)
        .with_paths(paths)
        .open()
        .context("Failed to open layered configuration")
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = open_config(&cli)?;

    match cli.command {
        Command::Dump(args) => {
            let properties = if args.interpolate {
                config.interpolated().properties()
            } else {
                config.properties()
            };
            print!("{}", render(&properties, args.format)?);
        }
        Command::Get { key, interpolate } => {
            let value = if interpolate {
                config.interpolated().get_string(&key)
            } else {
                config.get_string(&key)
            };
            match value {
                Some(value) => println!("{}", value),
                None => {
                    debug!("Property '{}' is not set", key);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Set { key, value } => {
            config
                .set_property(&key, &value)
                .with_context(|| format!("Failed to set '{}'", key))?;
            config.save().context("Failed to save home property file")?;
            info!("Set '{}' in {}", key, config.home_file().display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
