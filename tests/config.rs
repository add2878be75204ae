use anyhow::Result;
use serial_test::serial;
use std::fs;
use taskaid::config::{DATA_DIR_ENV, StoreConfig, load_config, load_config_file};
use tempfile::tempdir;

fn set_data_dir_env(value: &str) {
    // SAFETY: every test touching the environment is #[serial]
    unsafe {
        std::env::set_var(DATA_DIR_ENV, value);
    }
}

fn clear_data_dir_env() {
    // SAFETY: every test touching the environment is #[serial]
    unsafe {
        std::env::remove_var(DATA_DIR_ENV);
    }
}

#[test]
fn config_file_fills_defaults_and_resolves_relative_data_dir() -> Result<()> {
    let temp = tempdir()?;
    let path = temp.path().join("taskaid.toml");
    fs::write(&path, "data_dir = \"state\"\n")?;

    let config = load_config_file(&path)?;

    assert_eq!(config.app_folder_name, "DesktopTaskAid");
    assert_eq!(config.state_file_name, "appState.json");
    assert_eq!(config.data_dir, Some(temp.path().join("state")));

    Ok(())
}

#[test]
#[serial]
fn config_rejects_nested_names() -> Result<()> {
    clear_data_dir_env();
    let temp = tempdir()?;
    let path = temp.path().join("taskaid.toml");
    fs::write(&path, "state_file_name = \"../escape.json\"\n")?;

    assert!(load_config(Some(&path)).is_err());

    let config = StoreConfig {
        app_folder_name: "  ".to_string(),
        ..StoreConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(StoreConfig::default().validate().is_ok());

    Ok(())
}

#[test]
#[serial]
fn load_config_without_file_uses_defaults() -> Result<()> {
    clear_data_dir_env();

    let config = load_config(None)?;

    assert_eq!(config, StoreConfig::default());
    assert_eq!(config.data_dir, None);

    Ok(())
}

#[test]
#[serial]
fn env_data_dir_overrides_config_file() -> Result<()> {
    let temp = tempdir()?;
    let path = temp.path().join("taskaid.toml");
    fs::write(&path, "data_dir = \"from-file\"\n")?;
    let env_dir = temp.path().join("from-env");

    set_data_dir_env(&env_dir.to_string_lossy());
    let overridden = load_config(Some(&path));
    set_data_dir_env("");
    let ignored = load_config(Some(&path));
    clear_data_dir_env();

    assert_eq!(overridden?.data_dir, Some(env_dir));
    assert_eq!(ignored?.data_dir, Some(temp.path().join("from-file")));

    Ok(())
}
