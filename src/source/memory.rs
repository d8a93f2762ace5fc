//! In-memory property source.

use super::PropertySource;
use crate::error::{ConfigError, Result};
use std::collections::HashMap;

/// Properties held only in memory. Keys keep their insertion order.
///
/// There is no backing medium: `load` and `save` are unsupported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Overwriting keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MapSource::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl PropertySource for MapSource {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn load(&mut self) -> Result<()> {
        Err(ConfigError::unsupported("load", "an in-memory source"))
    }

    fn save(&self) -> Result<()> {
        Err(ConfigError::unsupported("save", "an in-memory source"))
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    fn keys(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.entries.iter().map(|(key, _)| key.clone()))
    }
}
