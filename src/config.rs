use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Error;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable that overrides `registrar.api_key`
pub const API_KEY_ENV: &str = "NAMECHEAP_API_KEY";

// Registrar limits for host record TTLs
const MIN_TTL: u32 = 60;
const MAX_TTL: u32 = 60000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registrar: RegistrarConfig,
    #[serde(default)]
    pub domain: DomainConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrarConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    #[serde(default = "default_sld")]
    pub sld: String,
    #[serde(default = "default_tld")]
    pub tld: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_a_record")]
    pub a_record: String,
    #[serde(default = "default_cname")]
    pub cname: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub dashboard_url: Option<String>,  // 托管方的域名设置页面（可选）
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_api_url() -> String {
    "https://api.namecheap.com/xml.response".to_string()
}

fn default_ip_lookup_url() -> String {
    "https://api.ipify.org".to_string()
}

fn default_sld() -> String {
    "social-ai".to_string()
}

fn default_tld() -> String {
    "pro".to_string()
}

fn default_a_record() -> String {
    "76.76.21.21".to_string()
}

fn default_cname() -> String {
    "cname.vercel-dns.com".to_string()
}

fn default_ttl() -> u32 {
    1800
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registrar: RegistrarConfig::default(),
            domain: DomainConfig::default(),
            target: TargetConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            ip_lookup_url: default_ip_lookup_url(),
        }
    }
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            sld: default_sld(),
            tld: default_tld(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            a_record: default_a_record(),
            cname: default_cname(),
            ttl: default_ttl(),
            dashboard_url: None,
        }
    }
}

impl DomainConfig {
    pub fn name(&self) -> String {
        format!("{}.{}", self.sld, self.tld)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Loads the explicit path if given, else `config.toml` when present,
    /// else built-in defaults. Returns the source that was used.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, String)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, path.display().to_string()));
        }

        let fallback = Path::new(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            return Ok((Self::load(fallback)?, DEFAULT_CONFIG_PATH.to_string()));
        }

        Ok((Self::default(), "built-in defaults".to_string()))
    }

    /// Replaces the API key with `value` when it is set and non-empty.
    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.registrar.api_key = key.trim().to_string();
        }
    }

    pub fn validate(&self) -> std::result::Result<(), Error> {
        if self.registrar.api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "registrar.api_key is empty; set it in the config file or via {}",
                API_KEY_ENV
            )));
        }

        let required = [
            ("domain.sld", &self.domain.sld),
            ("domain.tld", &self.domain.tld),
            ("target.a_record", &self.target.a_record),
            ("target.cname", &self.target.cname),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::config(format!("{} must not be empty", name)));
            }
        }

        if !(MIN_TTL..=MAX_TTL).contains(&self.target.ttl) {
            return Err(Error::config(format!(
                "target.ttl must be between {} and {}, got {}",
                MIN_TTL, MAX_TTL, self.target.ttl
            )));
        }

        Ok(())
    }
}
