use std::io::Write;

use raya_introspect::{
    describe, ConfigError, FieldDefinition, FilterProfile, IntrospectConfig, NullEntryPolicy,
    TypeIntrospector,
};

struct Sensor;

describe!(Sensor, |b| b
    .field_at(1, FieldDefinition::new("reading", "f64"))
    .field(FieldDefinition::new("threshold", "f64")));

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_config(
        r#"
profile = "legacy"
null_entries = "omit"
"#,
    );
    let config = IntrospectConfig::from_file(file.path()).unwrap();
    assert_eq!(config.profile, FilterProfile::Legacy);
    assert_eq!(config.null_entries, NullEntryPolicy::Omit);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let file = write_config(r#"null_entries = "omit""#);
    let config = IntrospectConfig::from_file(file.path()).unwrap();
    assert_eq!(config.profile, FilterProfile::Canonical);
    assert_eq!(config.null_entries, NullEntryPolicy::Omit);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = IntrospectConfig::from_file(&dir.path().join("introspect.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_config("profile = ");
    let result = IntrospectConfig::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_loaded_config_drives_queries() {
    let placeholder = TypeIntrospector::new();
    assert_eq!(
        placeholder.get_private_instance_fields(Some(&Sensor)).unwrap(),
        vec![" ", "reading", "threshold"]
    );

    let file = write_config(r#"null_entries = "omit""#);
    let config = IntrospectConfig::from_file(file.path()).unwrap();
    let omitting = TypeIntrospector::with_config(config);
    assert_eq!(
        omitting.get_private_instance_fields(Some(&Sensor)).unwrap(),
        vec!["reading", "threshold"]
    );
    assert_eq!(omitting.config().null_entries, NullEntryPolicy::Omit);
}
