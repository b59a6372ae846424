use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Blanket deadline for reading a request and writing its response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Runtime settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // Prefix for capability URL templates
    pub base_url: String,

    pub bind: IpAddr,

    pub port: u16,

    // JSON directory of accounts; an empty directory is served when unset
    pub directory: Option<PathBuf>,

    pub resolve_timeout: Duration,

    pub log_requests: bool,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Base URL without trailing slashes, ready to have a path appended.
    pub fn capability_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: default_port(),
            directory: None,
            resolve_timeout: default_resolve_timeout(),
            log_requests: true,
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "localhost".to_string()
}

fn default_resolve_timeout() -> Duration {
    Duration::from_millis(2000)
}
