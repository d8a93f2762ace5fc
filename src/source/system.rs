//! Process-wide system properties.
//!
//! The table is the only shared mutable state in the crate. It starts with a
//! few well-known entries (`user.home`, `user.dir`, `os.name`, ...) and falls
//! back to the live process environment for everything else. Writes land in
//! the table, never in the OS environment, and stay visible to every
//! [`SystemSource`] and to [`get`] for the rest of the process lifetime.

use super::PropertySource;
use crate::error::{ConfigError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{LazyLock, PoisonError, RwLock};

static TABLE: LazyLock<RwLock<BTreeMap<String, String>>> =
    LazyLock::new(|| RwLock::new(well_known()));

fn well_known() -> BTreeMap<String, String> {
    let mut table = BTreeMap::new();
    if let Some(home) = dirs::home_dir() {
        table.insert("user.home".to_string(), home.to_string_lossy().into_owned());
    }
    if let Ok(cwd) = std::env::current_dir() {
        table.insert("user.dir".to_string(), cwd.to_string_lossy().into_owned());
    }
    table.insert("os.name".to_string(), std::env::consts::OS.to_string());
    table.insert("os.arch".to_string(), std::env::consts::ARCH.to_string());
    table.insert(
        "file.separator".to_string(),
        std::path::MAIN_SEPARATOR_STR.to_string(),
    );
    table.insert(
        "line.separator".to_string(),
        if cfg!(windows) { "\r\n" } else { "\n" }.to_string(),
    );
    table
}

/// Current value of a system property.
pub fn get(key: &str) -> Option<String> {
    let table = TABLE.read().unwrap_or_else(PoisonError::into_inner);
    table
        .get(key)
        .cloned()
        .or_else(|| std::env::var(key).ok())
}

/// Set a system property for the whole process.
pub fn set(key: &str, value: &str) {
    let mut table = TABLE.write().unwrap_or_else(PoisonError::into_inner);
    table.insert(key.to_string(), value.to_string());
}

/// Sorted keys of the table plus every UTF-8 environment variable.
pub fn keys() -> Vec<String> {
    let table = TABLE.read().unwrap_or_else(PoisonError::into_inner);
    let mut keys: BTreeSet<String> = table.keys().cloned().collect();
    keys.extend(
        std::env::vars_os().filter_map(|(key, value)| {
            value.to_str()?;
            key.into_string().ok()
        }),
    );
    keys.into_iter().collect()
}

/// View of the process-wide system property table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSource;

impl SystemSource {
    pub fn new() -> Self {
        SystemSource
    }
}

impl PropertySource for SystemSource {
    fn name(&self) -> String {
        "system".to_string()
    }

    /// Nothing to load; the table is always live.
    fn load(&mut self) -> Result<()> {
        Ok(())
    }

    fn save(&self) -> Result<()> {
        Err(ConfigError::unsupported("save", "the system properties"))
    }

    fn get_property(&self, key: &str) -> Option<String> {
        get(key)
    }

    fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        set(key, value);
        Ok(())
    }

    fn keys(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(keys().into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TypedAccess;

    #[test]
    fn test_well_known_entries() {
        let system = SystemSource::new();
        assert_eq!(
            system.get_string("os.name").as_deref(),
            Some(std::env::consts::OS)
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(system.get_file("user.home"), Some(home));
        }
    }

    #[test]
    fn test_set_is_visible_process_wide() {
        let mut system = SystemSource::new();
        system
            .set_property("layerconf.test.system.set", "Andre Winkler")
            .unwrap();

        assert_eq!(
            get("layerconf.test.system.set").as_deref(),
            Some("Andre Winkler")
        );
        assert_eq!(
            SystemSource::new()
                .get_property("layerconf.test.system.set")
                .as_deref(),
            Some("Andre Winkler")
        );
        assert!(keys().contains(&"layerconf.test.system.set".to_string()));
    }

    #[test]
    fn test_environment_fallback() {
        // PATH is present in practically every test environment
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(get("PATH"), Some(path));
            assert!(SystemSource.keys().any(|k| k == "PATH"));
        }
    }

    #[test]
    fn test_save_unsupported() {
        let system = SystemSource::new();
        assert!(matches!(system.save(), Err(ConfigError::Unsupported(_))));
    }

    #[test]
    fn test_load_is_noop() {
        let mut system = SystemSource::new();
        assert!(system.load().is_ok());
    }

    #[test]
    fn test_properties_matches_lookup() {
        set("layerconf.test.system.copy", "copied");
        let copy = SystemSource.properties();
        assert_eq!(
            copy.get("layerconf.test.system.copy").map(String::as_str),
            Some("copied")
        );
        assert_eq!(
            copy.get("os.name").map(String::as_str),
            Some(std::env::consts::OS)
        );
    }
}
