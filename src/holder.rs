//! Layered configuration facade.
//!
//! Combines three sources with fixed precedence, highest first:
//! 1. **System** - the process-wide system property table
//! 2. **Home** - `<home dir>/<home file>`, created empty if missing
//! 3. **Bundled** - a resource shipped with the application; must exist
//!
//! Reads go through the precedence chain. Writes and saves go to the home
//! file, so user changes persist.

use crate::combined::CombinedSource;
use crate::error::{ConfigError, Result};
use crate::paths::{ConfigPaths, Location};
use crate::source::{FileSource, PropertySource, SystemSource, TypedAccess, is_blank};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info};

const HOME_LAYER: usize = 1;
const BUNDLED_LAYER: usize = 2;

/// How to build a [`LayeredConfig`].
#[derive(Debug, Clone)]
pub struct LayeredOptions {
    home_file_name: String,
    bundled_name: String,
    embedded: Option<&'static str>,
    paths: Option<ConfigPaths>,
}

impl LayeredOptions {
    /// `home_file_name` is looked up in the home directory, `bundled_name`
    /// in the resource directories.
    pub fn new(home_file_name: impl Into<String>, bundled_name: impl Into<String>) -> Self {
        Self {
            home_file_name: home_file_name.into(),
            bundled_name: bundled_name.into(),
            embedded: None,
            paths: None,
        }
    }

    /// Use explicit directories instead of [`ConfigPaths::discover`].
    pub fn with_paths(mut self, paths: ConfigPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Serve the bundled resource from compiled-in content.
    pub fn with_embedded(mut self, content: &'static str) -> Self {
        self.embedded = Some(content);
        self
    }

    pub fn open(self) -> Result<LayeredConfig> {
        LayeredConfig::open(self)
    }
}

/// System, home-file and bundled properties behind one lookup.
pub struct LayeredConfig {
    paths: ConfigPaths,
    home_file: PathBuf,
    bundled: Location,
    combined: CombinedSource,
}

impl LayeredConfig {
    /// Locate every layer and load it.
    ///
    /// Fails when a name is blank, when the bundled resource cannot be found,
    /// or when the home file cannot be created. Load failures of individual
    /// layers are logged and leave that layer empty.
    pub fn open(options: LayeredOptions) -> Result<Self> {
        if is_blank(&options.home_file_name) {
            return Err(ConfigError::blank_argument("home file name"));
        }
        if is_blank(&options.bundled_name) {
            return Err(ConfigError::blank_argument("bundled resource name"));
        }

        let paths = options.paths.unwrap_or_else(ConfigPaths::discover);
        let bundled = Self::locate_bundled(&paths, &options.bundled_name, options.embedded)?;
        let home_file = Self::ensure_home_file(&paths, &options.home_file_name)?;

        let combined = CombinedSource::new()
            .with_source(SystemSource::new())
            .with_source(FileSource::new(home_file.as_path()))
            .with_source(FileSource::new(bundled.clone()));

        let mut config = Self {
            paths,
            home_file,
            bundled,
            combined,
        };
        config.reload();
        Ok(config)
    }

    fn locate_bundled(
        paths: &ConfigPaths,
        name: &str,
        embedded: Option<&'static str>,
    ) -> Result<Location> {
        if let Some(content) = embedded {
            return Ok(Location::embedded(name, content));
        }
        let location = paths
            .find_resource(name)
            .map(Location::File)
            .ok_or_else(|| ConfigError::resource_not_found(name))?;
        debug!("Load bundled resource '{}'", location);
        Ok(location)
    }

    fn ensure_home_file(paths: &ConfigPaths, name: &str) -> Result<PathBuf> {
        let path = paths.home_file(name).ok_or_else(|| {
            ConfigError::InvalidState("cannot determine the home directory".to_string())
        })?;

        if !path.exists() {
            info!("Creating empty home property file {}", path.display());
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                ConfigError::InvalidState(format!(
                    "cannot create home property file {}: {}",
                    path.display(),
                    err
                ))
            })?;
        Ok(path)
    }

    /// Re-read every layer. Failures are logged; a failing layer keeps
    /// whatever it held before.
    pub fn reload(&mut self) {
        self.combined.load_all();

        if tracing::enabled!(Level::DEBUG) {
            for (label, index) in [("Home", HOME_LAYER), ("Bundled", BUNDLED_LAYER)] {
                if let Some(source) = self.combined.source(index) {
                    debug!(
                        "{} properties ({}):\n{}",
                        label,
                        source.name(),
                        source.debug_output()
                    );
                }
            }
        }
    }

    /// Path of the per-user property file.
    pub fn home_file(&self) -> &Path {
        &self.home_file
    }

    /// Where the bundled resource was found.
    pub fn bundled_location(&self) -> &Location {
        &self.bundled
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// The underlying precedence chain: system, home, bundled.
    pub fn combined(&self) -> &CombinedSource {
        &self.combined
    }

    fn home_source(&self) -> Result<&(dyn PropertySource + 'static)> {
        self.combined
            .source(HOME_LAYER)
            .ok_or_else(ConfigError::no_sources)
    }

    fn home_source_mut(&mut self) -> Result<&mut (dyn PropertySource + 'static)> {
        self.combined
            .source_mut(HOME_LAYER)
            .ok_or_else(ConfigError::no_sources)
    }
}

impl PropertySource for LayeredConfig {
    fn name(&self) -> String {
        format!("layered({})", self.home_file.display())
    }

    fn load(&mut self) -> Result<()> {
        self.reload();
        Ok(())
    }

    /// Persist the home file.
    fn save(&self) -> Result<()> {
        self.home_source()?.save()
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.combined.get_property(key)
    }

    /// Write to the home file layer. Not persisted until [`save`](Self::save).
    fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        self.home_source_mut()?.set_property(key, value)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = String> + '_> {
        self.combined.keys()
    }
}
