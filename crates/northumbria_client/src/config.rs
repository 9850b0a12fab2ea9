use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    /// Hosts reached directly even when a proxy is set (`NO_PROXY` syntax).
    #[serde(default)]
    pub no_proxy: String,
    #[serde(default)]
    pub debug: bool,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            http_proxy: String::new(),
            https_proxy: String::new(),
            no_proxy: String::new(),
            debug: false,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory when present, then
    /// applies environment overrides. A malformed file is an error so the
    /// caller can report it before falling back to [`Config::from_env`].
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE_PATH))?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Defaults plus environment overrides, ignoring any config file.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChatError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| ChatError::Config(format!("malformed {}: {e}", path.display())))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = lookup("ASKNORTHUMBRIA_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(http_proxy) = lookup("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = lookup("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
        if let Some(no_proxy) = lookup("NO_PROXY").or_else(|| lookup("no_proxy")) {
            self.no_proxy = no_proxy;
        }
        if let Some(debug) = lookup("ASKNORTHUMBRIA_DEBUG") {
            self.debug = parse_bool_env(&debug);
        }
    }

    /// Full URL of the agent's chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api_base.trim_end_matches('/'))
    }
}
