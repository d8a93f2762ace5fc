//! Ordered fallback over several property sources.
//!
//! Sources are consulted in the order they were added: the first one whose
//! value for a key is non-blank wins. Index 0 is also the only source that
//! receives writes and saves.

use crate::error::{ConfigError, ErrorCode, Result};
use crate::source::{PropertySource, is_blank};
use tracing::{debug, warn};

/// Several sources merged by precedence.
#[derive(Default)]
pub struct CombinedSource {
    /// Highest precedence first
    sources: Vec<Box<dyn PropertySource>>,
}

impl CombinedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower precedence than every source added so far.
    pub fn add_source(&mut self, source: impl PropertySource + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Builder form of [`add_source`](Self::add_source).
    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.add_source(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn source(&self, index: usize) -> Option<&(dyn PropertySource + 'static)> {
        self.sources.get(index).map(|s| &**s)
    }

    pub fn source_mut(&mut self, index: usize) -> Option<&mut (dyn PropertySource + 'static)> {
        self.sources.get_mut(index).map(|s| &mut **s)
    }

    /// Load every source in precedence order, continuing past failures.
    ///
    /// Returns the failures; each one has already been logged.
    pub fn load_all(&mut self) -> Vec<ConfigError> {
        let mut failures = Vec::new();
        for source in &mut self.sources {
            match source.load() {
                Ok(()) => debug!(source = %source.name(), "Loaded source"),
                Err(err) => {
                    if err.code() == ErrorCode::Unsupported {
                        debug!(source = %source.name(), "Source has nothing to load: {}", err);
                    } else {
                        warn!(source = %source.name(), "Failed to load source: {}", err);
                    }
                    failures.push(err);
                }
            }
        }
        failures
    }

    fn first(&self) -> Result<&(dyn PropertySource + 'static)> {
        self.source(0).ok_or_else(ConfigError::no_sources)
    }

    fn first_mut(&mut self) -> Result<&mut (dyn PropertySource + 'static)> {
        self.source_mut(0).ok_or_else(ConfigError::no_sources)
    }
}

impl PropertySource for CombinedSource {
    fn name(&self) -> String {
        let names: Vec<String> = self.sources.iter().map(|s| s.name()).collect();
        format!("combined[{}]", names.join(", "))
    }

    /// Best-effort: individual failures are logged, never returned.
    fn load(&mut self) -> Result<()> {
        self.load_all();
        Ok(())
    }

    fn save(&self) -> Result<()> {
        self.first()?.save()
    }

    fn get_property(&self, key: &str) -> Option<String> {
        self.sources
            .iter()
            .filter_map(|source| source.get_property(key))
            .find(|value| !is_blank(value))
    }

    fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        self.first_mut()?.set_property(key, value)
    }

    /// Keys of every source chained in precedence order, duplicates included.
    fn keys(&self) -> Box<dyn Iterator<Item = String> + '_> {
        Box::new(self.sources.iter().flat_map(|source| source.keys()))
    }
}
