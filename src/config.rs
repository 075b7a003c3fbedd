//! Crate configuration, loaded once from `.ehsintel.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Calculator defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Profit margin (percent) used when a dossier carries none.
    /// Inherited product constant; kept configurable on purpose.
    #[serde(default = "default_profit_margin")]
    pub default_profit_margin: f64,

    /// Hours assumed per employee per year when estimating hours worked.
    #[serde(default = "default_hours_per_employee")]
    pub hours_per_employee: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_profit_margin: default_profit_margin(),
            hours_per_employee: default_hours_per_employee(),
        }
    }
}

/// Backoff policy for rate-limited store calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON dossier store.
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Path of the append-only activity log.
    #[serde(default = "default_activity_path")]
    pub activity_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            activity_path: default_activity_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EhsConfig {
    #[serde(default)]
    pub calculators: CalculatorConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

fn default_profit_margin() -> f64 {
    3.0
}

fn default_hours_per_employee() -> u64 {
    2000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_store_path() -> String {
    "dossiers.json".to_string()
}

fn default_activity_path() -> String {
    "activity.jsonl".to_string()
}

pub const CONFIG_FILE: &str = ".ehsintel.toml";

static CONFIG: OnceLock<EhsConfig> = OnceLock::new();

/// Load configuration from `.ehsintel.toml` in the working directory,
/// falling back to defaults when the file is absent or unreadable.
pub fn get_config() -> &'static EhsConfig {
    CONFIG.get_or_init(|| load_from(Path::new(CONFIG_FILE)).unwrap_or_default())
}

pub fn load_from(path: &Path) -> Option<EhsConfig> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("ignoring malformed config {}: {}", path.display(), e);
            None
        }
    }
}
