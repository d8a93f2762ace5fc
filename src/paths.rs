//! Where property files live.
//!
//! Two locations matter to the layered configuration:
//! 1. **Home** - a file in the user's home directory (`LAYERCONF_HOME_DIR`
//!    overrides `dirs::home_dir()`)
//! 2. **Resources** - bundled files searched first-found-wins across the
//!    resource directories (`LAYERCONF_RESOURCE_PATH`, default `.`)

use crate::error::{ConfigError, Result};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding the home directory.
pub const HOME_DIR_ENV: &str = "LAYERCONF_HOME_DIR";

/// Environment variable listing resource directories (platform path separator).
pub const RESOURCE_PATH_ENV: &str = "LAYERCONF_RESOURCE_PATH";

/// Backing medium of a file-backed property source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file on the local filesystem; readable and writable.
    File(PathBuf),
    /// Content compiled into the binary (e.g. via `include_str!`); read-only.
    Embedded {
        name: String,
        content: Cow<'static, str>,
    },
}

impl Location {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Location::File(path.into())
    }

    pub fn embedded(name: impl Into<String>, content: &'static str) -> Self {
        Location::Embedded {
            name: name.into(),
            content: Cow::Borrowed(content),
        }
    }

    /// The local path, if this location is a writable file.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::File(path) => Some(path),
            Location::Embedded { .. } => None,
        }
    }

    pub fn exists(&self) -> bool {
        match self {
            Location::File(path) => path.is_file(),
            Location::Embedded { .. } => true,
        }
    }

    /// Read the whole medium as UTF-8 text.
    pub fn read_to_string(&self) -> Result<String> {
        match self {
            Location::File(path) => {
                std::fs::read_to_string(path).map_err(|err| ConfigError::io(self, err))
            }
            Location::Embedded { content, .. } => Ok(content.to_string()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Embedded { name, .. } => write!(f, "embedded:{}", name),
        }
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Location::File(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::File(path.to_path_buf())
    }
}

/// Directories consulted by the layered configuration.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Directory holding the per-user property file
    pub home_dir: Option<PathBuf>,
    /// Directories searched, in order, for bundled property files
    pub resource_dirs: Vec<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover paths from environment and defaults.
    pub fn discover() -> Self {
        // Home dir: LAYERCONF_HOME_DIR or ~
        let home_dir = std::env::var_os(HOME_DIR_ENV)
            .map(PathBuf::from)
            .or_else(dirs::home_dir);

        // Resource dirs: LAYERCONF_RESOURCE_PATH or the working directory
        let resource_dirs = std::env::var_os(RESOURCE_PATH_ENV)
            .map(|value| std::env::split_paths(&value).collect::<Vec<_>>())
            .filter(|dirs| !dirs.is_empty())
            .unwrap_or_else(|| vec![PathBuf::from(".")]);

        Self {
            home_dir,
            resource_dirs,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(home_dir: Option<PathBuf>, resource_dirs: Vec<PathBuf>) -> Self {
        Self {
            home_dir,
            resource_dirs,
        }
    }

    /// Path of a file directly inside the home directory.
    pub fn home_file(&self, file_name: &str) -> Option<PathBuf> {
        self.home_dir.as_ref().map(|dir| dir.join(file_name))
    }

    /// Find a bundled resource, searching resource directories in order.
    ///
    /// A leading `/` is ignored, so `/app.properties` and `app.properties`
    /// name the same resource.
    pub fn find_resource(&self, name: &str) -> Option<PathBuf> {
        let relative = name.trim_start_matches('/');
        self.resource_dirs
            .iter()
            .map(|dir| dir.join(relative))
            .find(|path| path.is_file())
    }
}
