/*!
 * Tests for application configuration
 */

use anyhow::Result;
use canonical_commentary::app_config::{Config, LayoutConfig, LogLevel};
use crate::common;

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaultConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = temp_dir.path().join("canonical.json");

    let config = Config::load_or_create(&config_path)?;

    assert!(config_path.exists());
    assert_eq!(config.layout, LayoutConfig::default());
    let reloaded = Config::load_or_create(&config_path)?;
    assert_eq!(reloaded.log_level, config.log_level);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(
        temp_dir.path(),
        "canonical.json",
        r#"{"layout": {"image_dir": "images/jpg", "image_extension": "jpg"}, "warm_up_on_load": true}"#,
    )?;

    let config = Config::load_or_create(&config_path)?;

    assert!(config.warm_up_on_load);
    assert_eq!(config.layout.canonical_dir, "canonical/v2");
    assert_eq!(config.layout.image_dir, "images/jpg");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config_path = common::create_test_file(temp_dir.path(), "canonical.json", "{ not json")?;

    assert!(Config::load_or_create(&config_path).is_err());
    Ok(())
}

#[test]
fn test_validate_withEmptyExtension_shouldFail() {
    let mut config = Config::default();
    config.layout.image_extension = ".".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.layout.canonical_dir = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_logLevel_toLevelFilter_shouldMatchLevels() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
