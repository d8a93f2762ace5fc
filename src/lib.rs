//! Layered string-property configuration.
//!
//! Properties are resolved from an ordered chain of sources: process-wide
//! system properties, a per-user properties file and a bundled resource.
//! Typed accessors, placeholder interpolation and persistence of the user
//! layer are built on a single [`PropertySource`] trait.

pub mod cli;
pub mod combined;
pub mod error;
pub mod format;
pub mod holder;
pub mod interpolate;
pub mod logging;
pub mod paths;
pub mod properties;
pub mod source;

pub use combined::CombinedSource;
pub use error::{ConfigError, ErrorCode, Result};
pub use holder::{LayeredConfig, LayeredOptions};
pub use paths::{ConfigPaths, Location};
pub use source::{FileSource, MapSource, PropertySource, SystemSource, TypedAccess};
