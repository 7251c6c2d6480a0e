use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::types::QueryError;

const CONFIG_PATHS: [&str; 2] = ["/etc/querylens/querylens.toml", "./querylens.toml"];

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Engine and CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Cap applied by the service layer after the engine has run.
    #[serde(default)]
    pub max_result_rows: Option<usize>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_result_rows: None,
            log_level: default_log_level(),
            output: OutputFormat::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration with priority: ENV > config file > defaults.
    ///
    /// `explicit` replaces the default search paths and must exist.
    /// CLI overrides are applied by the caller on top of the result.
    pub fn load(explicit: Option<&Path>) -> Result<Self, QueryError> {
        let mut builder = Config::builder();

        match explicit {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
                    builder = builder.add_source(File::with_name(path).required(false));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix("QUERYLENS").try_parsing(true));

        Ok(builder.build()?.try_deserialize()?)
    }
}
