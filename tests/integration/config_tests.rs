use clap::Parser;
use dupscan::cli::Cli;
use dupscan::config::{Config, DEFAULT_MIN_SIZE};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all DUPSCAN_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("DUPSCAN_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_config_missing_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();

    let config = Config::load_from_path(dir.path().join("nonexistent.toml"));

    assert_eq!(config, Config::default());
    assert_eq!(config.min_size, DEFAULT_MIN_SIZE);
}

#[test]
fn test_config_load_from_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
min_size = "1KiB"
parallelism = 6
thorough = true
output = "json"
exclusions_file = "/etc/dupscan/exclusions.txt"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(path);

    assert_eq!(config.min_size, 1024);
    assert_eq!(config.parallelism, 6);
    assert!(config.thorough);
    assert_eq!(config.output, "json");
    assert_eq!(
        config.exclusions_file,
        Some(PathBuf::from("/etc/dupscan/exclusions.txt"))
    );
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "parallelism = \"many\"").unwrap();

    assert_eq!(Config::load_from_path(path), Config::default());
}

#[test]
fn test_config_hierarchy_defaults_file_env_cli() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    // 1. Config file overrides defaults
    fs::write(&path, "output = \"csv\"\nparallelism = 8\n").unwrap();

    // 2. Environment variables override the config file
    std::env::set_var("DUPSCAN_OUTPUT", "json");
    std::env::set_var("DUPSCAN_MIN_SIZE", "2KiB");

    let mut config = Config::load_from_path(path);
    assert_eq!(config.output, "json");
    assert_eq!(config.parallelism, 8);
    assert_eq!(config.min_size, 2048);

    // 3. CLI flags override environment variables
    let cli = Cli::try_parse_from(["dupscan", "-o", "stdout", "-p", "2", "-t", "/d"]).unwrap();
    config.merge_cli(&cli);
    assert_eq!(config.output, "stdout");
    assert_eq!(config.parallelism, 2);
    assert!(config.thorough);
    assert_eq!(config.min_size, 2048);

    clear_env();
}

#[test]
fn test_unset_cli_flags_keep_loaded_values() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env();
    let mut config = Config {
        thorough: true,
        exclusions_file: Some(PathBuf::from("/x")),
        ..Config::default()
    };

    let cli = Cli::try_parse_from(["dupscan", "/d"]).unwrap();
    config.merge_cli(&cli);

    assert!(config.thorough);
    assert_eq!(config.exclusions_file, Some(PathBuf::from("/x")));
    assert_eq!(config.output, "text");
}
