use comanda_client::ClientConfig;
use comanda_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use shared::seed::DEFAULT_TAB_POOL_SIZE;
use std::str::FromStr;

/// Where the repositories get their data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Seeded in-memory data
    #[default]
    Memory,
    /// REST backend at `api_base_url`
    Remote,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" | "local" => Ok(Self::Memory),
            "remote" | "http" | "api" => Ok(Self::Remote),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// Desk configuration
///
/// # Environment variables
///
/// | Variable | Default | |
/// |----------|---------|---|
/// | API_BASE_URL | https://localhost:7097/api | REST backend |
/// | BACKEND | memory | `memory` or `remote` |
/// | TAB_POOL_SIZE | 50 | seeded tab slots (memory backend) |
/// | REQUEST_TIMEOUT_SECS | 30 | HTTP timeout |
/// | ACCEPT_INVALID_CERTS | false | allow self-signed dev certificates |
/// | LOG_LEVEL | info | |
/// | LOG_JSON | false | JSON console output |
/// | LOG_DIR | unset | daily rolling log files |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub api_base_url: String,
    pub backend: Backend,
    pub tab_pool_size: u32,
    pub request_timeout_secs: u64,
    pub accept_invalid_certs: bool,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl DeskConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            backend: parse_var(&get, "BACKEND").unwrap_or_default(),
            tab_pool_size: parse_var(&get, "TAB_POOL_SIZE")
                .filter(|n: &u32| *n > 0)
                .unwrap_or(DEFAULT_TAB_POOL_SIZE),
            request_timeout_secs: parse_var(&get, "REQUEST_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: parse_var(&get, "ACCEPT_INVALID_CERTS").unwrap_or(false),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_var(&get, "LOG_JSON").unwrap_or(false),
            log_dir: get("LOG_DIR").filter(|d| !d.trim().is_empty()),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_base_url)
            .with_timeout(self.request_timeout_secs)
            .with_accept_invalid_certs(self.accept_invalid_certs)
    }
}

fn parse_var<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    get(key).and_then(|v| v.trim().parse().ok())
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
