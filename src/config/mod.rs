//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Configuration for the magic-link issuance itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Link time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Raw entropy bytes for the single-use token (before base64 encoding)
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,

    /// Raw entropy bytes for the application token
    #[serde(default = "default_app_token_bytes")]
    pub app_token_bytes: usize,

    /// Deep-link URL scheme; the generated link is
    /// `<scheme>://link/consume?token=<token>`
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Interval in seconds between background sweeps of expired records.
    /// Zero disables the sweeper and leaves eviction purely lazy.
    #[serde(default)]
    pub sweep_interval_secs: u64,
}

fn default_ttl_secs() -> u64 {
    600
}

fn default_token_bytes() -> usize {
    32
}

fn default_app_token_bytes() -> usize {
    48
}

fn default_scheme() -> String {
    "gearted".to_string()
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            token_bytes: default_token_bytes(),
            app_token_bytes: default_app_token_bytes(),
            scheme: default_scheme(),
            sweep_interval_secs: 0,
        }
    }
}

/// Complete configuration for the link service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address to bind the HTTP listener to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP listener to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Magic-link issuance settings
    #[serde(default)]
    pub link: LinkConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            link: LinkConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment overrides on top of the loaded values
    ///
    /// Recognized variables: `LINK_SERVICE_HOST`, `LINK_SERVICE_PORT`,
    /// `LINK_SERVICE_TTL_SECS`, `LINK_SERVICE_SCHEME`,
    /// `LINK_SERVICE_SWEEP_INTERVAL_SECS`.
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(host) = std::env::var("LINK_SERVICE_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("LINK_SERVICE_PORT") {
            self.port = port.parse()?;
        }
        if let Ok(ttl) = std::env::var("LINK_SERVICE_TTL_SECS") {
            self.link.ttl_secs = ttl.parse()?;
        }
        if let Ok(scheme) = std::env::var("LINK_SERVICE_SCHEME") {
            self.link.scheme = scheme;
        }
        if let Ok(interval) = std::env::var("LINK_SERVICE_SWEEP_INTERVAL_SECS") {
            self.link.sweep_interval_secs = interval.parse()?;
        }
        Ok(self)
    }

    /// The socket address string to bind to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
