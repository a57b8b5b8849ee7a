use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct Config {
    pub(crate) gemini_api_key: Option<String>,
    pub(crate) default_branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            default_branch: String::from("main"),
        }
    }
}

impl Config {
    fn path() -> PathBuf {
        home::home_dir()
            .expect("failed to locate user home directory")
            .join(".wrapgen.toml")
    }

    pub(crate) fn init() -> Result<Self> {
        let path = Self::path();

        let config = if !path.exists() {
            let config = Self::default();
            let contents = toml::to_string_pretty(&config)?;
            fs::write(path, contents)?;
            config
        } else {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        };

        Ok(config)
    }
}
