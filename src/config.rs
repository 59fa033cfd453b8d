use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charts::{CdfMethod, ChartKind};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "WLAN_INSIGHT_CONFIG";

/// Config file looked up in the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "wlan-insight.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything the dashboard reads at startup. Every field has a default, so
/// a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Measurement table loaded at startup.
    pub data_path: PathBuf,
    pub cdf_method: CdfMethod,
    /// Grid slots, row-major, four per row.
    pub layout: Vec<ChartKind>,
    pub axis_limits: AxisLimits,
}

/// Upper x-axis bounds for the CDF plots. Purely visual: the computed series
/// are never clipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisLimits {
    pub throughput_max: f64,
    pub jitter_max: f64,
    pub retry_max: f64,
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self {
            throughput_max: 100.0,
            jitter_max: 20.0,
            retry_max: 30.0,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("all_data_timing_edited.csv"),
            cdf_method: CdfMethod::default(),
            layout: ChartKind::DEFAULT_LAYOUT.to_vec(),
            axis_limits: AxisLimits::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config file. A relative `data_path` is resolved against the
    /// config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;

        if config.data_path.is_relative() {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                config.data_path = dir.join(&config.data_path);
            }
        }
        if config.layout.is_empty() {
            log::warn!("Config layout is empty, using the default grid");
            config.layout = ChartKind::DEFAULT_LAYOUT.to_vec();
        }
        Ok(config)
    }

    /// Resolve the config location from [`CONFIG_ENV`] or
    /// [`DEFAULT_CONFIG_FILE`]. A missing default file yields defaults; a
    /// missing file named by the variable is an error.
    pub fn discover() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Self::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            log::info!("Using config {}", path.display());
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
