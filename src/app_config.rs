use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Folder conventions of a commentary directory
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Precompute every derived attribute right after loading
    #[serde(default)]
    pub warm_up_on_load: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Folder conventions of a commentary directory.
///
/// A commentary lives in a base directory holding its canonical json files
/// and its page images, e.g. `<base>/canonical/v2/<ocr_run>.json` and
/// `<base>/images/png/<page_id>.png`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    // @field: Canonical json folder, relative to the base directory
    #[serde(default = "default_canonical_dir")]
    pub canonical_dir: String,

    // @field: Page image folder, relative to the base directory
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    // @field: Page image file extension
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canonical_dir: default_canonical_dir(),
            image_dir: default_image_dir(),
            image_extension: default_image_extension(),
        }
    }
}

impl LayoutConfig {
    // @returns: Path of a page image below `base_dir`
    pub fn image_path(&self, base_dir: Option<&Path>, image_id: &str) -> std::path::PathBuf {
        let file_name = format!("{}.{}", image_id, self.image_extension);
        match base_dir {
            Some(base_dir) => base_dir.join(&self.image_dir).join(file_name),
            None => Path::new(&self.image_dir).join(file_name),
        }
    }

    // @returns: Default canonical json location of an OCR run
    pub fn canonical_path(&self, base_dir: &Path, ocr_run: &str) -> std::path::PathBuf {
        base_dir.join(&self.canonical_dir).join(format!("{}.json", ocr_run))
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    // @level: Errors only
    Error,
    // @level: Warnings and errors
    Warn,
    // @level: Informational messages
    #[default]
    Info,
    // @level: Debug details
    Debug,
    // @level: Everything
    Trace,
}

impl LogLevel {
    // @returns: Matching `log` level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_canonical_dir() -> String {
    "canonical/v2".to_string()
}

fn default_image_dir() -> String {
    "images/png".to_string()
}

fn default_image_extension() -> String {
    "png".to_string()
}

impl Config {
    /// Load the configuration at `path`, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        for (name, dir) in [("canonical_dir", &layout.canonical_dir), ("image_dir", &layout.image_dir)] {
            if dir.trim().is_empty() {
                return Err(anyhow!("Layout {} must not be empty", name));
            }
            if Path::new(dir).is_absolute() {
                return Err(anyhow!("Layout {} must be relative to the commentary base directory: {}", name, dir));
            }
        }

        let extension = layout.image_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains('/') {
            return Err(anyhow!("Invalid image extension: {}", layout.image_extension));
        }

        Ok(())
    }
}
