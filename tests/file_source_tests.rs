//! Integration tests for properties files.
//!
//! Tests FileSource against a realistic fixture:
//! - Parsing (comments, separators, continuations, escapes)
//! - Typed accessors and their fail-soft defaults
//! - Save/load round trips

use layerconf::{ConfigError, FileSource, Location, PropertySource, TypedAccess};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/app.properties");

fn fixture() -> FileSource {
    FileSource::open(Path::new(FIXTURE)).expect("Failed to load fixture")
}

mod parsing_tests {
    use super::*;

    #[test]
    fn test_separators_and_whitespace() {
        let source = fixture();
        assert_eq!(source.get_string("app.name").as_deref(), Some("Layered Demo"));
        assert_eq!(source.get_string("app.version").as_deref(), Some("1.4.2"));
        assert_eq!(
            source.get_string("app.greeting").as_deref(),
            Some("Hello, ${user.name}!")
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let source = fixture();
        assert!(source.keys().all(|k| !k.starts_with('#') && !k.starts_with('!')));
    }

    #[test]
    fn test_continuation_lines() {
        let source = fixture();
        assert_eq!(
            source.get_string("multi.line").as_deref(),
            Some("first, second, third")
        );
    }

    #[test]
    fn test_escapes() {
        let source = fixture();
        assert_eq!(source.get_string("escaped key").as_deref(), Some("tab\there"));
        assert_eq!(source.get_string("unicode").as_deref(), Some("café"));
        assert_eq!(
            source.get_string("path.windows").as_deref(),
            Some("C:\\Program Files\\Demo")
        );
    }

    #[test]
    fn test_blank_values_listed_but_absent() {
        let source = fixture();
        let keys: Vec<String> = source.keys().collect();
        assert!(keys.contains(&"empty.value".to_string()));
        assert!(keys.contains(&"blank.value".to_string()));
        assert!(source.get_property("empty.value").is_none());
        assert!(source.get_property("blank.value").is_none());
        assert_eq!(source.get_string_or("blank.value", "fallback"), "fallback");
    }
}

mod typed_access_tests {
    use super::*;

    #[test]
    fn test_int_and_long() {
        let source = fixture();
        assert_eq!(source.get_int("window.width"), 1280);
        // Not a number
        assert_eq!(source.get_int_or("window.height", 800), 800);
        // Out of i32 range
        assert_eq!(source.get_int_or("retry.count", 3), 3);
        assert_eq!(source.get_long("retry.count"), 2_147_483_648);
        assert_eq!(source.get_long("cache.size"), 9_000_000_000);
        assert_eq!(source.get_long_or("missing", -1), -1);
    }

    #[test]
    fn test_bool() {
        let source = fixture();
        assert!(source.get_bool("feature.enabled"));
        // Only "true" (any case) is true
        assert!(!source.get_bool_or("feature.beta", true));
        assert!(source.get_bool_or("feature.missing", true));
        assert!(!source.get_bool("feature.missing"));
    }

    #[test]
    fn test_file() {
        let source = fixture();
        assert_eq!(
            source.get_file("data.dir"),
            Some(PathBuf::from("/var/lib/layerconf"))
        );
        assert_eq!(source.get_file_or("log.dir", "/tmp"), PathBuf::from("/tmp"));
        assert!(source.get_file("blank.value").is_none());
    }

    #[test]
    fn test_properties_copy_skips_blank() {
        let source = fixture();
        let copy = source.properties();
        assert!(copy.contains_key("app.name"));
        assert!(!copy.contains_key("blank.value"));
        assert!(!copy.contains_key("empty.value"));
    }
}

mod persistence_tests {
    use super::*;

    #[test]
    fn test_save_then_reload_round_trip() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("copy.properties");

        let original = fixture();
        let mut copy = FileSource::new(path.as_path());
        for key in original.keys() {
            if let Some(value) = original.get_property(&key) {
                copy.set_property(&key, &value).expect("Failed to set property");
            }
        }
        copy.set_property("leading.space", "  indented").unwrap();
        copy.set_property("with=equals:colon", "#not a comment").unwrap();
        copy.save().expect("Failed to save");

        let reloaded = FileSource::open(path.as_path()).expect("Failed to reload");
        assert_eq!(reloaded.properties(), copy.properties());
        assert_eq!(
            reloaded.get_string("leading.space").as_deref(),
            Some("  indented")
        );
        assert_eq!(
            reloaded.get_string("with=equals:colon").as_deref(),
            Some("#not a comment")
        );
    }

    #[test]
    fn test_saved_file_starts_with_comment_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.properties");
        let mut source = FileSource::new(path.as_path());
        source.set_property("a", "1").unwrap();
        source.save().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header: Vec<&str> = text.lines().take_while(|l| l.starts_with('#')).collect();
        assert_eq!(header.len(), 2);
        assert!(header[0].starts_with("#Saved on: "));
        assert!(text.lines().any(|l| l == "a=1"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let source = FileSource::new(temp.path().join("no/such/dir/x.properties"));
        assert!(matches!(source.save(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_embedded_resource_is_read_only() {
        let mut source = FileSource::new(Location::embedded("defaults.properties", "k = v\n"));
        source.load().unwrap();
        assert_eq!(source.name(), "embedded:defaults.properties");
        assert_eq!(source.get_string("k").as_deref(), Some("v"));
        assert!(matches!(source.save(), Err(ConfigError::Unsupported(_))));
    }
}
