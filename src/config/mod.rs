use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/tasks";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),
    #[error("Invalid HOST value '{0}'")]
    InvalidHost(String),
}

/// Settings for the proxy server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: IpAddr,
    pub port: u16,
    pub api_base_url: String,
    pub static_dir: PathBuf,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ProxyConfig {
    /// Reads `PORT`, `HOST`, `API_BASE_URL` and `STATIC_DIR` from the process
    /// environment. Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(host) = lookup("HOST") {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host.clone()))?;
        }
        if let Some(url) = lookup("API_BASE_URL").filter(|url| !url.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(dir) = lookup("STATIC_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Settings for clients talking to the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub proxy_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let proxy_url = lookup("PROXY_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string());
        Self { proxy_url }
    }
}
