//! Runtime configuration.
//!
//! Sets are described in a JSON file named by `IPMAP_CONFIG` (default
//! [`DEFAULT_CONFIG_FILE`]). Field paths are reported on parse errors.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// Config file used when `IPMAP_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "ipmap.json";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "IPMAP_CONFIG";

fn default_set_type() -> String {
    "ipmap".to_string()
}

/// One set to create.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetConfig {
    /// Name used when listing the set.
    pub name: String,
    /// Registered set type name.
    #[serde(rename = "type", default = "default_set_type")]
    pub set_type: String,
    /// Creation options, e.g. `--network 10.0.0.0/24 --netmask 26`.
    pub create: String,
    /// Addresses to add after creation.
    #[serde(default)]
    pub members: Vec<String>,
    /// List sub-block members as `a.b.c.d/bits`.
    #[serde(default)]
    pub show_blocks: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub sets: Vec<SetConfig>,
}

/// Path of the config file, from the environment or the default.
pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
}

/// Parse config JSON.
pub fn parse_config(json: &str) -> Result<Config, Box<dyn Error>> {
    let de = &mut serde_json::Deserializer::from_str(json);
    let config: Config = serde_path_to_error::deserialize(de)
        .map_err(|e| format!("Error parsing config at {}: {}", e.path(), e.inner()))?;
    Ok(config)
}

/// Read the config file at `path`, or at [`config_path`] if `None`.
pub fn read_config(path: Option<&str>) -> Result<Config, Box<dyn Error>> {
    let path = path.map(str::to_string).unwrap_or_else(config_path);
    if !Path::new(&path).exists() {
        return Err(format!("Config file does not exist: {path}").into());
    }
    log::info!("Reading config file: {path}");
    let json = std::fs::read_to_string(&path)
        .map_err(|e| format!("Error reading config file {path}: {e}"))?;
    parse_config(&json)
}
