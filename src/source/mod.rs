//! Property sources and the typed accessors shared by all of them.
//!
//! A [`PropertySource`] is anything that can answer "what is the raw value of
//! key K", enumerate its keys, and optionally load/save a backing medium:
//! - [`MapSource`] - in-memory, insertion ordered, never persisted
//! - [`FileSource`] - properties text in a file or embedded resource
//! - [`SystemSource`] - the process-wide system property table
//!
//! [`TypedAccess`] is implemented for every source and derives typed values
//! from the raw strings. Blank values count as absent everywhere.

mod file;
mod memory;
pub mod system;

pub use file::FileSource;
pub use memory::MapSource;
pub use system::SystemSource;

use crate::error::Result;
use crate::interpolate;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// A named set of string properties with an optional backing medium.
pub trait PropertySource {
    /// Short description used in logs and diagnostics.
    fn name(&self) -> String;

    /// (Re)populate from the backing medium, replacing prior contents.
    fn load(&mut self) -> Result<()>;

    /// Persist the current contents to the backing medium.
    fn save(&self) -> Result<()>;

    /// Raw value for `key`, if any.
    fn get_property(&self, key: &str) -> Option<String>;

    /// Insert or overwrite a property.
    fn set_property(&mut self, key: &str, value: &str) -> Result<()>;

    /// Every key currently held. Each call starts a fresh iteration.
    fn keys(&self) -> Box<dyn Iterator<Item = String> + '_>;
}

/// Whitespace-only and empty values are treated as unset.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn present<S: PropertySource + ?Sized>(source: &S, key: &str) -> Option<String> {
    source.get_property(key).filter(|value| !is_blank(value))
}

fn parse_or<T>(key: &str, value: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match value.parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(key, value, %err, "Not a number, using default");
            default
        }
    }
}

/// Typed getters over any [`PropertySource`].
///
/// Getters never fail: a missing, blank or unparseable value resolves to the
/// default.
pub trait TypedAccess: PropertySource {
    /// Raw value, or `default` only when the key is absent. Blank values
    /// are returned as-is.
    fn get_property_or(&self, key: &str, default: &str) -> String {
        self.get_property(key)
            .unwrap_or_else(|| default.to_string())
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get_property(key)
    }

    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_property_or(key, default)
    }

    fn get_bool(&self, key: &str) -> bool {
        self.get_bool_or(key, false)
    }

    /// `true` only for `"true"` in any case; other non-blank text is `false`.
    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        present(self, key)
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(default)
    }

    fn get_int(&self, key: &str) -> i32 {
        self.get_int_or(key, 0)
    }

    fn get_int_or(&self, key: &str, default: i32) -> i32 {
        match present(self, key) {
            Some(value) => parse_or(key, &value, default),
            None => default,
        }
    }

    fn get_long(&self, key: &str) -> i64 {
        self.get_long_or(key, 0)
    }

    fn get_long_or(&self, key: &str, default: i64) -> i64 {
        match present(self, key) {
            Some(value) => parse_or(key, &value, default),
            None => default,
        }
    }

    /// The raw value as a path. No existence check.
    fn get_file(&self, key: &str) -> Option<PathBuf> {
        present(self, key).map(PathBuf::from)
    }

    fn get_file_or(&self, key: &str, default: impl Into<PathBuf>) -> PathBuf {
        self.get_file(key).unwrap_or_else(|| default.into())
    }

    /// Copy of every resolvable property. Changes to the copy do not reach
    /// the source.
    fn properties(&self) -> BTreeMap<String, String> {
        let mut copy = BTreeMap::new();
        for key in self.keys() {
            if copy.contains_key(&key) {
                continue;
            }
            if let Some(value) = present(self, &key) {
                copy.insert(key, value);
            }
        }
        copy
    }

    /// One `key = value` line per enumerated key.
    fn debug_output(&self) -> String {
        let mut out = String::new();
        for key in self.keys() {
            let value = self.get_property(&key).unwrap_or_default();
            out.push_str(&format!("{} = {}\n", key, value));
        }
        out
    }

    /// Detached snapshot with `${key}` placeholders substituted once.
    fn interpolated(&self) -> MapSource {
        interpolate::interpolate(self)
    }
}

impl<S: PropertySource + ?Sized> TypedAccess for S {}
