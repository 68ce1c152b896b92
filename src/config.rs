use crate::error::Result;
use crate::types::{Direction, Order};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "census.yaml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub flows: PathBuf,
    pub duration: PathBuf,
    pub reasons: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            flows: PathBuf::from("D01_cleaned.csv"),
            duration: PathBuf::from("D02_cleaned.csv"),
            reasons: PathBuf::from("D03_cleaned.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub direction: Direction,
    pub threshold: u64,
    pub top: usize,
    pub order: Order,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig { direction: Direction::Inflow, threshold: 1000, top: 5, order: Order::Highest }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub view: ViewConfig,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config { data: DataConfig::default(), view: ViewConfig::default(), output_dir: PathBuf::from(".") }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Config> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Load the config file.
///
/// An explicit path must exist and parse. Without one, `census.yaml` in the
/// working directory is used when present, else built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() {
                p.to_path_buf()
            } else {
                debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(Config::default());
            }
        }
    };
    let s = fs::read_to_string(&path)?;
    debug!(path = %path.display(), "loaded config");
    Config::from_yaml(&s)
}
