use anyhow::{anyhow, Result};
use std::ffi::OsStr;
use std::fs::File;

use justconfig::item::ValueExtractor;
use justconfig::processors::Trim;
use justconfig::sources::env::Env;
use justconfig::sources::text::ConfigText;
use justconfig::ConfPath;
use justconfig::Config;

use crate::config_processors::StripQuotes;
use crate::validation::DEFAULT_VALIDATION_SIZE;

const DEFAULT_OUTPUT_DIRECTORY: &str = ".";
const DEFAULT_LOG_LEVEL: &str = "info";

pub struct AppConfig {
    pub data: DataConfig,
    pub validation: ValidationConfig,
    pub log: LogConfig,
}

pub struct DataConfig {
    pub labeled_data_path: String,
    pub predictions_path: Option<String>,
    pub output_directory: String,
}

pub struct ValidationConfig {
    pub sample_size: usize,
    /// Unseeded runs draw from entropy and are not reproducible.
    pub seed: Option<u64>,
}

pub struct LogConfig {
    pub level: String,
}

impl AppConfig {
    /// Loads the config file at `config_path` (if it exists) and applies environment overrides.
    pub fn new(config_path: &str) -> Result<AppConfig> {
        let mut conf = Config::default();

        if let Ok(config_file) = File::open(config_path) {
            let config_text = ConfigText::new(config_file, config_path)
                .map_err(|e| anyhow!("Loading configuration file {} failed: {}", config_path, e))?;
            conf.add_source(config_text);
        }

        let config_env = Env::new(&[
            (
                ConfPath::from(&["data", "labeled_data_path"]),
                OsStr::new("LABELED_DATA"),
            ),
            (
                ConfPath::from(&["data", "predictions_path"]),
                OsStr::new("PREDICTIONS"),
            ),
            (
                ConfPath::from(&["validation", "seed"]),
                OsStr::new("VALIDATION_SEED"),
            ),
        ]);
        conf.add_source(config_env);

        AppConfig::parse(&conf)
    }

    pub fn parse(conf: &Config) -> Result<AppConfig> {
        Ok(AppConfig {
            data: DataConfig::parse(conf, ConfPath::from(&["data"]))?,
            validation: ValidationConfig::parse(conf, ConfPath::from(&["validation"]))?,
            log: LogConfig::parse(conf, ConfPath::from(&["log"])),
        })
    }
}

impl DataConfig {
    fn parse(conf: &Config, path: ConfPath) -> Result<DataConfig> {
        Ok(DataConfig {
            labeled_data_path: conf
                .get(path.push("labeled_data_path"))
                .strip_quotes()
                .value()
                .map_err(|e| anyhow!("data.labeled_data_path is required: {}", e))?,
            predictions_path: conf
                .get(path.push("predictions_path"))
                .strip_quotes()
                .try_value()
                .map_err(|e| anyhow!("Invalid data.predictions_path: {}", e))?,
            output_directory: conf
                .get(path.push("output_directory"))
                .strip_quotes()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_OUTPUT_DIRECTORY)),
        })
    }
}

impl ValidationConfig {
    fn parse(conf: &Config, path: ConfPath) -> Result<ValidationConfig> {
        Ok(ValidationConfig {
            sample_size: conf
                .get(path.push("sample_size"))
                .trim()
                .try_value()
                .map_err(|e| anyhow!("Invalid validation.sample_size: {}", e))?
                .unwrap_or(DEFAULT_VALIDATION_SIZE),
            seed: conf
                .get(path.push("seed"))
                .trim()
                .try_value()
                .map_err(|e| anyhow!("Invalid validation.seed: {}", e))?,
        })
    }
}

impl LogConfig {
    fn parse(conf: &Config, path: ConfPath) -> LogConfig {
        LogConfig {
            level: conf
                .get(path.push("level"))
                .strip_quotes()
                .value()
                .unwrap_or_else(|_| String::from(DEFAULT_LOG_LEVEL)),
        }
    }
}
