use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Application configuration: typed global sections plus a per-module bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging sections; `None` falls back to plain console output.
    pub logging: Option<LoggingConfig>,
    /// Per-module configuration bag: module name → arbitrary YAML/JSON value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Deployment label (`dev`, `staging`, `prod`, ...).
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Comma separated CORS origins. `None` selects the built-in list.
    #[serde(default)]
    pub allowed_origins_raw: Option<String>,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Raw connection string, normalized by `catalog_db::resolve` before use.
    #[serde(default)]
    pub url: Option<String>,
    /// Refuse to start without an explicit `url`.
    #[serde(default)]
    pub require_url: bool,
}

/// Logging configuration: subsystem name → its settings.
/// Key "default" is the catch-all for targets without their own section.
pub type LoggingConfig = HashMap<String, Section>;

pub const DEFAULT_LOG_SECTION: &str = "default";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "" disables file output
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

fn default_env() -> String {
    "dev".to_string()
}

fn default_timeout_sec() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            env: default_env(),
            secret_key: None,
            allowed_origins_raw: None,
            timeout_sec: default_timeout_sec(),
        }
    }
}

pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        DEFAULT_LOG_SECTION.to_string(),
        Section {
            console_level: "info".to_string(),
            file: String::new(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            logging: Some(default_logging_config()),
            modules: HashMap::new(),
        }
    }
}

/// Flat variables understood for compatibility with plain `.env` deployments.
const FLAT_ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("ALLOWED_ORIGINS_RAW", "server.allowed_origins_raw"),
    ("ENV", "server.env"),
    ("SECRET_KEY", "server.secret_key"),
];

fn flat_env() -> Env {
    let names: Vec<&str> = FLAT_ENV_KEYS.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        FLAT_ENV_KEYS
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, path)| (*path).into())
            .unwrap_or_else(|| key.into())
    })
}

impl AppConfig {
    /// Layered loading: defaults → YAML file (if given) → flat env → `APP__` env.
    pub fn load_layered(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment
            .merge(flat_env())
            // Example: APP__SERVER__PORT=9000 maps to server.port
            .merge(Env::prefixed("APP__").split("__"));

        figment
            .extract()
            .context("Failed to extract config from figment")
    }

    /// Same as [`AppConfig::load_layered`], taking the CLI's string path.
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self> {
        Self::load_layered(config_path.map(Path::new))
    }

    /// YAML dump with secrets masked.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.redacted()).context("Failed to serialize config to YAML")
    }

    /// Copy suitable for printing or logging.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.server.secret_key.is_some() {
            copy.server.secret_key = Some("***".to_string());
        }
        copy.database.url = copy
            .database
            .url
            .as_deref()
            .map(catalog_db::redact_credentials);
        copy
    }

    /// Typed view of one module's section; missing sections yield the type's defaults.
    pub fn module_config<T: DeserializeOwned + Default>(&self, module: &str) -> Result<T> {
        match self.modules.get(module) {
            Some(value) => serde_json::from_value(value.clone())
                .with_context(|| format!("invalid config for module '{module}'")),
            None => Ok(T::default()),
        }
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut(DEFAULT_LOG_SECTION) {
            match args.verbose {
                0 => {}
                1 => default_section.console_level = "debug".to_string(),
                _ => default_section.console_level = "trace".to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}
