//! Configuration loading tests against temporary config directories.

use ambari_check::{ConfigManager, ConfigurationError};
use std::fs;
use tempfile::TempDir;

const BASE_CONFIG: &str = r#"
url: http://ambari.local:8080
username: admin
password: s3cr3t-password
tags:
  - team:data
services:
  HDFS:
    components: [namenode]
    metric_headers: [cpu]

test:
  timeout_ms: 2500
  collect_service_status: true
  services:
    YARN:
      components: [RESOURCEMANAGER]

production:
  url: https://ambari.prod:8443
"#;

fn config_dir(contents: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("ambari-config.yaml"), contents).expect("write config");
    dir
}

#[test]
fn config_loads_with_environment_overrides() {
    let dir = config_dir(BASE_CONFIG);

    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
            .expect("config should load");
    let config = manager.config();

    assert_eq!(manager.environment(), "test");
    assert_eq!(config.base_url(), "http://ambari.local:8080");
    assert_eq!(config.timeout_ms, 2500);
    assert!(config.collect_service_status);
    assert!(config.collect_host_metrics);
    assert_eq!(config.tags, vec!["team:data"]);
    assert_eq!(
        config.services.keys().cloned().collect::<Vec<_>>(),
        vec!["HDFS", "YARN"]
    );
    assert_eq!(
        config.services["HDFS"].component_whitelist(),
        vec!["NAMENODE"]
    );
}

#[test]
fn config_without_matching_environment_uses_base() {
    let dir = config_dir(BASE_CONFIG);

    let manager = ConfigManager::load_from_directory_with_env(
        Some(dir.path().to_path_buf()),
        "development",
    )
    .expect("config should load");

    assert_eq!(manager.config().timeout_ms, 10_000);
    assert_eq!(manager.config().services.len(), 1);
    assert!(manager.config_file().ends_with("ambari-config.yaml"));
}

#[test]
fn debug_config_masks_credentials() {
    let dir = config_dir(BASE_CONFIG);

    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "production")
            .expect("config should load");
    let rendered = manager.debug_config().to_string();

    assert!(!rendered.contains("s3cr3t-password"));
    assert!(rendered.contains("[MASKED]"));
    assert!(rendered.contains("https://ambari.prod:8443"));
}

#[test]
fn yml_extension_is_accepted() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ambari-config.yml"),
        "url: http://ambari.local:8080\n",
    )
    .unwrap();

    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
            .expect("config should load");
    assert!(manager.config().services.is_empty());
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();

    let err = ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::ConfigFileNotFound { .. }));
}

#[test]
fn invalid_yaml_is_reported() {
    let dir = config_dir("url: [unterminated\n");

    let err = ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::InvalidYaml { .. }));
}

#[test]
fn invalid_values_fail_validation() {
    let dir = config_dir("url: http://ambari.local:8080\ntimeout_ms: 0\n");

    let err = ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
}

#[test]
fn bundled_config_is_valid() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config");

    for environment in ["development", "test", "production"] {
        let manager = ConfigManager::load_from_directory_with_env(Some(dir.clone()), environment)
            .expect("bundled config should load");
        assert!(manager.config().services.contains_key("HDFS"));
    }
}
