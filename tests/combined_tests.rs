//! Integration tests for CombinedSource over heterogeneous sources.

use layerconf::{
    CombinedSource, ConfigError, ErrorCode, FileSource, Location, MapSource, PropertySource,
    TypedAccess,
};
use tempfile::TempDir;

fn map(pairs: &[(&str, &str)]) -> MapSource {
    pairs.iter().copied().collect()
}

#[test]
fn test_file_over_embedded_defaults() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join("user.properties");
    std::fs::write(&path, "port=9090\n").unwrap();

    let mut combined = CombinedSource::new()
        .with_source(FileSource::new(path.as_path()))
        .with_source(FileSource::new(Location::embedded(
            "defaults",
            "port=8080\nhost=localhost\n",
        )));
    assert!(combined.load_all().is_empty());

    assert_eq!(combined.get_int("port"), 9090);
    assert_eq!(combined.get_string("host").as_deref(), Some("localhost"));
}

#[test]
fn test_save_writes_first_source_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("user.properties");

    let mut combined = CombinedSource::new()
        .with_source(FileSource::new(path.as_path()))
        .with_source(map(&[("fallback", "yes")]));
    combined.set_property("written", "1").unwrap();
    combined.save().expect("Failed to save");

    let saved = FileSource::open(path.as_path()).unwrap();
    assert_eq!(saved.get_string("written").as_deref(), Some("1"));
    assert!(saved.get_property("fallback").is_none());
}

#[test]
fn test_load_reports_each_failure() {
    let temp = TempDir::new().unwrap();
    let mut combined = CombinedSource::new()
        .with_source(FileSource::new(temp.path().join("missing.properties")))
        .with_source(map(&[("k", "v")]));

    let failures = combined.load_all();
    let codes: Vec<ErrorCode> = failures.iter().map(ConfigError::code).collect();
    assert_eq!(codes, vec![ErrorCode::IoError, ErrorCode::Unsupported]);
    assert_eq!(combined.get_string("k").as_deref(), Some("v"));
}

#[test]
fn test_nested_combinators() {
    let inner = CombinedSource::new()
        .with_source(map(&[("a", "inner-a")]))
        .with_source(map(&[("b", "inner-b")]));
    let outer = CombinedSource::new()
        .with_source(map(&[("b", "outer-b")]))
        .with_source(inner);

    assert_eq!(outer.get_string("a").as_deref(), Some("inner-a"));
    assert_eq!(outer.get_string("b").as_deref(), Some("outer-b"));
    assert_eq!(outer.keys().count(), 3);
}

#[test]
fn test_debug_output_lists_resolved_values() {
    let combined = CombinedSource::new()
        .with_source(map(&[("x", "1")]))
        .with_source(map(&[("x", "2"), ("y", "3")]));
    let dump = combined.debug_output();
    assert!(dump.contains("x = 1\n"));
    assert!(dump.contains("y = 3\n"));
    assert!(!dump.contains("x = 2"));
}
