//! Rendering of resolved properties for the command line.

use anyhow::Result;
use std::collections::BTreeMap;

/// Output format for property listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `key = value` lines
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: text, json, yaml",
                s
            )),
        }
    }
}

/// Render a key-sorted property map.
pub fn render(properties: &BTreeMap<String, String>, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => properties
            .iter()
            .map(|(key, value)| format!("{} = {}\n", key, value))
            .collect(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(properties)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(properties)?,
    };
    Ok(rendered)
}
