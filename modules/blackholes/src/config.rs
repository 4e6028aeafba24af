use serde::{Deserialize, Serialize};

/// Configuration for the blackholes module (`modules.blackholes` in YAML).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlackholesConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Insert the reference catalog into an empty table at startup.
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,
}

impl Default for BlackholesConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            seed_on_startup: default_seed_on_startup(),
        }
    }
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

fn default_seed_on_startup() -> bool {
    true
}
