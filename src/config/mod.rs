use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub display: DisplayConfig,
}

/// Dataset location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

/// Presentation defaults for the CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    #[serde(default = "default_currency")]
    pub currency: String,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_csv_path() -> PathBuf {
    PathBuf::from("data/walmart_sales.csv")
}
fn default_preview_rows() -> usize {
    10
}
fn default_currency() -> String {
    "$".to_string()
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("SALES").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|_| AppConfig::default());
        Ok(app_cfg)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                csv_path: default_csv_path(),
            },
            display: DisplayConfig {
                preview_rows: default_preview_rows(),
                currency: default_currency(),
            },
        }
    }
}
