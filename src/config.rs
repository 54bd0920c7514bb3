use dotenvy::dotenv;
use log::LevelFilter;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{EdaError, Result};

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub listings_path: PathBuf,
    pub reviews_path: PathBuf,
    pub neighbourhoods_path: PathBuf,
    pub waterways_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    #[serde(default = "default_top_reviewers")]
    pub top_reviewers: usize,
    #[serde(default = "default_waterway_limit")]
    pub waterway_limit: usize,
    #[serde(default)]
    pub focus_reviewers: Vec<String>,
    #[serde(default)]
    pub focus_neighbourhoods: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_top_reviewers() -> usize {
    10
}

fn default_waterway_limit() -> usize {
    400
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| EdaError::Config(format!("unknown log level '{}'", self.log_level)))
    }
}

pub fn create_test_config() -> Config {
    Config {
        listings_path: PathBuf::from("listings.csv"),
        reviews_path: PathBuf::from("reviews.csv"),
        neighbourhoods_path: PathBuf::from("neighbourhoods.geojson"),
        waterways_path: None,
        output_dir: PathBuf::from("out"),
        top_reviewers: 3,
        waterway_limit: default_waterway_limit(),
        focus_reviewers: Vec::new(),
        focus_neighbourhoods: Vec::new(),
        log_level: default_log_level(),
    }
}

pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| EdaError::Config(e.to_string()))
}

pub fn read_config() -> Result<Config> {
    dotenv().ok();
    let config_path = env::var(CONFIG_PATH_ENV)
        .map_err(|_| EdaError::Config(format!("{CONFIG_PATH_ENV} .env not set")))?;
    let text = std::fs::read_to_string(&config_path).map_err(|source| EdaError::Load {
        path: PathBuf::from(&config_path),
        source,
    })?;
    parse_config(&text)
}
