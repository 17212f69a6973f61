use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_MARKET_TITLE: &str = "Will it rain in NYC tomorrow?";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub order: OrderConfig,
    #[serde(default)]
    pub impact: ImpactConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_title")]
    pub default_title: String,
    #[serde(default = "default_yes_probability")]
    pub initial_yes_probability: f64,
    #[serde(default = "default_cash")]
    pub initial_cash: f64,
    #[serde(default = "default_order_size")]
    pub initial_order_size: f64,
}

/// Order size limits. `max_order_size` is enforced by the engine when set;
/// the other two only bound the sizing helpers.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfig {
    #[serde(default)]
    pub max_order_size: Option<f64>,
    #[serde(default = "default_preset_cap")]
    pub preset_size_cap: f64,
    #[serde(default = "default_slider_max")]
    pub slider_max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImpactConfig {
    #[serde(default = "default_shares_per_unit")]
    pub shares_per_unit: f64,
    #[serde(default = "default_max_impact")]
    pub max_impact: f64,
    #[serde(default = "default_floor")]
    pub floor: f64,
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub csv_logging: bool,
    #[serde(default = "default_csv_path")]
    pub csv_log_path: String,
}

fn default_title() -> String { DEFAULT_MARKET_TITLE.to_string() }
fn default_yes_probability() -> f64 { 0.62 }
fn default_cash() -> f64 { 1000.0 }
fn default_order_size() -> f64 { 50.0 }
fn default_preset_cap() -> f64 { 10_000.0 }
fn default_slider_max() -> f64 { 500.0 }
fn default_shares_per_unit() -> f64 { 2000.0 }
fn default_max_impact() -> f64 { 0.08 }
fn default_floor() -> f64 { 0.01 }
fn default_ceiling() -> f64 { 0.99 }
fn default_base_url() -> String { "http://localhost:3000".to_string() }
fn default_csv_path() -> String { "trades.csv".to_string() }

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            initial_yes_probability: default_yes_probability(),
            initial_cash: default_cash(),
            initial_order_size: default_order_size(),
        }
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            max_order_size: None,
            preset_size_cap: default_preset_cap(),
            slider_max: default_slider_max(),
        }
    }
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            shares_per_unit: default_shares_per_unit(),
            max_impact: default_max_impact(),
            floor: default_floor(),
            ceiling: default_ceiling(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            csv_logging: false,
            csv_log_path: default_csv_path(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub config_path: String,
    pub widget_base_url: Option<String>,
    pub market: Option<String>,
}

impl Config {
    /// Load from a TOML file, falling back to defaults if it doesn't exist.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            tracing::warn!("Config file {} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would let a price leave (0, 1) or make the
    /// impact clamp unsatisfiable.
    pub fn validate(&self) -> Result<()> {
        let impact = &self.impact;
        if !(impact.floor > 0.0 && impact.floor < impact.ceiling && impact.ceiling < 1.0) {
            bail!(
                "impact bounds must satisfy 0 < floor < ceiling < 1 (floor {}, ceiling {})",
                impact.floor,
                impact.ceiling
            );
        }
        if !(impact.max_impact >= 0.0) {
            bail!("impact.max_impact must be non-negative, got {}", impact.max_impact);
        }
        if !(impact.shares_per_unit > 0.0) {
            bail!("impact.shares_per_unit must be positive, got {}", impact.shares_per_unit);
        }

        let session = &self.session;
        if !(session.initial_yes_probability >= impact.floor
            && session.initial_yes_probability <= impact.ceiling)
        {
            bail!(
                "session.initial_yes_probability {} is outside [{}, {}]",
                session.initial_yes_probability,
                impact.floor,
                impact.ceiling
            );
        }
        if !(session.initial_cash >= 0.0) {
            bail!("session.initial_cash must be non-negative, got {}", session.initial_cash);
        }

        Ok(())
    }
}

impl EnvConfig {
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(Self {
            config_path: std::env::var("MARKET_SIM_CONFIG")
                .unwrap_or_else(|_| "config.toml".to_string()),
            widget_base_url: std::env::var("WIDGET_BASE_URL")
                .or_else(|_| std::env::var("BASE_URL"))
                .ok(),
            market: std::env::var("MARKET").ok(),
        })
    }
}
