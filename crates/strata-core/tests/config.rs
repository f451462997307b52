use strata_core::config::{dirs_path, GlobalConfig};
use tempfile::TempDir;

#[test]
fn test_global_config_default_file_name() {
    let config = GlobalConfig::default();
    assert_eq!(config.modules.file_name, "strata.json");
}

#[test]
fn test_global_config_default_fails_on_conflict() {
    let config = GlobalConfig::default();
    assert!(config.check.fail_on_conflict);
}

#[test]
fn test_global_config_defaults_from_empty_toml() {
    let config: GlobalConfig = toml::from_str("").unwrap();
    assert_eq!(config.modules.file_name, "strata.json");
    assert!(config.check.fail_on_conflict);
}

#[test]
fn test_dirs_path_contains_strata() {
    let path = dirs_path();
    assert!(path.ends_with(".strata"));
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
[modules]
file-name = "modules.json"

[check]
fail-on-conflict = false
"#;
    let config: GlobalConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.modules.file_name, "modules.json");
    assert!(!config.check.fail_on_conflict);
}

#[test]
fn test_load_from_missing_file_returns_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert!(config.check.fail_on_conflict);
}

#[test]
fn test_load_from_malformed_file_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[check\nfail-on-conflict = ").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {err}");
}
