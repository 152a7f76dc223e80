use anyhow::Context;
use contracts::dashboards::d402_revenue_calendar::CalendarPolicy;
use contracts::dashboards::d403_logistics_flow::NodeIdentity;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::a002_geo_boundary::{default_aliases, AliasTable};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub calendar: CalendarPolicy,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub geography: GeographyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Path to the sales CSV
    pub sales_csv: String,
    /// Path or http(s) URL of the country-border GeoJSON
    pub boundaries: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FiltersConfig {
    /// Year used when the `year` parameter is missing or unparseable
    #[serde(default = "default_year")]
    pub default_year: i32,
}

fn default_year() -> i32 {
    2025
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            default_year: default_year(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FlowConfig {
    #[serde(default)]
    pub node_identity: NodeIdentity,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeographyConfig {
    /// Boundary name -> sales-data name
    #[serde(default = "default_aliases")]
    pub aliases: AliasTable,
}

impl Default for GeographyConfig {
    fn default() -> Self {
        Self {
            aliases: default_aliases(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[data]
sales_csv = "data/online_sales_dataset.csv"
boundaries = "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson"

[filters]
default_year = 2025

[calendar]
reference_year = 2025
exclude_negative_revenue = true
leap_day = "fold_into_feb28"

[flow]
node_identity = "namespaced"

[geography.aliases]
USA = "United States"
England = "United Kingdom"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                return load_config_file(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    default_config()
}

/// Explicit path wins; otherwise the usual search order applies.
pub fn load_config_from(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_config_file(path),
        None => load_config(),
    }
}

pub fn default_config() -> anyhow::Result<Config> {
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from: {}", path.display());
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Resolve a local data path.
///
/// Absolute paths are used as is. A relative path is tried next to the
/// executable first, then relative to the current directory.
pub fn resolve_data_path(raw: &str) -> PathBuf {
    let path = Path::new(raw);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(path);
            if resolved_path.exists() {
                return resolved_path;
            }
        }
    }

    PathBuf::from(raw)
}
