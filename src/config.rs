//! Configuration system for the pipeline simulator.
//!
//! Settings are read from a TOML file with two sections, `[general]` for run
//! behaviour and `[files]` for the initializer and output paths. Every field
//! has a default, so an empty file (or no file at all) reproduces the fixed
//! file names the simulator has always used.

use std::fs;

use serde::Deserialize;

use crate::common::SimError;

const REGISTER_FILE: &str = "RF.txt";
const INSTRUCTION_CACHE: &str = "ICache.txt";
const DATA_CACHE: &str = "DCache.txt";
const DATA_CACHE_OUT: &str = "ODCache.txt";
const STATS_OUT: &str = "Output.txt";

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Run behaviour.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Input and output file locations.
    #[serde(default)]
    pub files: FilesConfig,
}

/// Run behaviour settings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Emit per-stage trace lines.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Cycle budget; 0 means unlimited.
    #[serde(default)]
    pub max_cycles: u64,
}

/// File locations.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FilesConfig {
    #[serde(default = "default_register_file")]
    pub register_file: String,

    #[serde(default = "default_instruction_cache")]
    pub instruction_cache: String,

    #[serde(default = "default_data_cache")]
    pub data_cache: String,

    #[serde(default = "default_data_cache_out")]
    pub data_cache_out: String,

    #[serde(default = "default_stats_out")]
    pub stats_out: String,

    /// Optional JSON export of the statistics.
    #[serde(default)]
    pub stats_json: Option<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            register_file: default_register_file(),
            instruction_cache: default_instruction_cache(),
            data_cache: default_data_cache(),
            data_cache_out: default_data_cache_out(),
            stats_out: default_stats_out(),
            stats_json: None,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &str) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

fn default_register_file() -> String {
    REGISTER_FILE.to_string()
}

fn default_instruction_cache() -> String {
    INSTRUCTION_CACHE.to_string()
}

fn default_data_cache() -> String {
    DATA_CACHE.to_string()
}

fn default_data_cache_out() -> String {
    DATA_CACHE_OUT.to_string()
}

fn default_stats_out() -> String {
    STATS_OUT.to_string()
}
