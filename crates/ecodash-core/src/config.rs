use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::Aggregation;
use crate::events::{default_events, HistoricalEvent};
use crate::palette::SeverityScale;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Slider bounds for the selected year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearBounds {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min: 1850,
            max: 2025,
            default: 2020,
        }
    }
}

impl YearBounds {
    pub fn clamp(&self, year: i64) -> i64 {
        year.clamp(self.min, self.max)
    }

    pub fn contains(&self, year: i64) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// Product content of the dashboard. Every field has a default, so a config file only
/// lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub world_territory: String,
    pub unknown_continent: String,
    pub focus_territory: String,
    pub gdp_focus_territory: String,
    pub region_share_territories: Vec<String>,
    pub gdp_share_territories: Vec<String>,
    /// Decade shown on the sunburst breakdowns.
    pub breakdown_decade: i64,
    /// Territory whose rows feed the decade chart; every row when unset.
    pub events_territory: Option<String>,
    pub growth_aggregation: Aggregation,
    pub gdp_scale: f64,
    pub gdp_min_value: f64,
    pub year_bounds: YearBounds,
    pub events: Vec<HistoricalEvent>,
    pub severity: SeverityScale,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            world_territory: "World".to_string(),
            unknown_continent: ecodash_parser::UNKNOWN_CONTINENT.to_string(),
            focus_territory: "Spain".to_string(),
            gdp_focus_territory: "Democratic Republic of Congo".to_string(),
            region_share_territories: vec!["China".to_string(), "United States".to_string()],
            gdp_share_territories: vec![
                "Democratic Republic of Congo".to_string(),
                "Liberia".to_string(),
            ],
            breakdown_decade: 2010,
            events_territory: None,
            growth_aggregation: Aggregation::Sum,
            gdp_scale: 1_000_000.0,
            gdp_min_value: 1.0,
            year_bounds: YearBounds::default(),
            events: default_events(),
            severity: SeverityScale::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.year_bounds;
        if bounds.min > bounds.max {
            return Err(ConfigError::Invalid(format!(
                "year_bounds.min ({}) exceeds year_bounds.max ({})",
                bounds.min, bounds.max
            )));
        }
        if !bounds.contains(bounds.default) {
            return Err(ConfigError::Invalid(format!(
                "year_bounds.default ({}) lies outside {}..={}",
                bounds.default, bounds.min, bounds.max
            )));
        }
        if self.breakdown_decade.rem_euclid(10) != 0 {
            return Err(ConfigError::Invalid(format!(
                "breakdown_decade ({}) is not a multiple of 10",
                self.breakdown_decade
            )));
        }
        if let Some(event) = self.events.iter().find(|e| e.decade.rem_euclid(10) != 0) {
            return Err(ConfigError::Invalid(format!(
                "event '{}' is pinned to {}, which is not a decade",
                event.label, event.decade
            )));
        }
        if !self.gdp_scale.is_finite() || self.gdp_scale <= 0.0 {
            return Err(ConfigError::Invalid(
                "gdp_scale must be a positive number".to_string(),
            ));
        }
        self.severity.validate()
    }
}
