//! Properties file source.

use super::{PropertySource, is_blank};
use crate::error::{ConfigError, Result};
use crate::paths::Location;
use crate::properties;
use chrono::Local;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::debug;

/// Properties backed by a properties-format file or embedded resource.
///
/// Nothing is read until [`load`](PropertySource::load) is called. Blank
/// values are reported as absent.
#[derive(Debug, Clone)]
pub struct FileSource {
    location: Location,
    properties: BTreeMap<String, String>,
}

impl FileSource {
    /// Bind to a location without reading it.
    pub fn new(location: impl Into<Location>) -> Self {
        Self {
            location: location.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Bind to a location and load it.
    pub fn open(location: impl Into<Location>) -> Result<Self> {
        let mut source = Self::new(location);
        source.load()?;
        Ok(source)
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let now = Local::now();
        let header = [
            format!("Saved on: {}", now.format("%x")),
            now.to_rfc2822(),
        ];
        properties::write(
            out,
            &header,
            self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}

impl PropertySource for FileSource {
    fn name(&self) -> String {
        self.location.to_string()
    }

    fn load(&mut self) -> Result<()> {
        let text = self.location.read_to_string()?;
        let entries = properties::parse(&text).map_err(|err| {
            ConfigError::io(&self.location, io::Error::new(io::ErrorKind::InvalidData, err))
        })?;

        self.properties = entries.into_iter().collect();
        debug!(
            location = %self.location,
            count = self.properties.len(),
            "Loaded properties"
        );
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let Some(path) = self.location.as_path() else {
            return Err(ConfigError::unsupported("save", &self.name()));
        };

        let file = File::create(path).map_err(|err| ConfigError::io(&self.location, err))?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)
            .and_then(|()| out.flush())
            .map_err(|err| ConfigError::io(&self.location, err))?;

        debug!(location = %self.location, "Saved properties");
        Ok(())
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.properties
            .get(key)
            .filter(|value| !is_blank(value))
            .cloned()
    }

    fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        self.properties.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.properties.keys().cloned())
    }
}
