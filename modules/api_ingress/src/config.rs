use std::time::Duration;

use runtime::ServerConfig;

/// Origins accepted when `ALLOWED_ORIGINS_RAW` is unset or empty.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://app.blackhole.bond",
    "http://localhost:5173",
    "http://localhost:8000",
];

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// HTTP host settings derived from the `server` config section.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiIngressConfig {
    /// `host:port`; hostnames are resolved at bind time.
    pub bind_addr: String,
    pub request_timeout: Duration,
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl ApiIngressConfig {
    pub fn from_server(server: &ServerConfig) -> Self {
        let mut allowed_origins = parse_allowed_origins(server.allowed_origins_raw.as_deref());
        if allowed_origins.is_empty() {
            allowed_origins = DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect();
        }
        Self {
            bind_addr: bind_addr(&server.host, server.port),
            request_timeout: Duration::from_secs(server.timeout_sec),
            allowed_origins,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self::from_server(&ServerConfig::default())
    }
}

/// Comma separated list; items are trimmed and blanks dropped.
pub fn parse_allowed_origins(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn bind_addr(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
