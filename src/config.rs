use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::Metric;
use crate::error::MorphoError;
use crate::neuromorpho::DEFAULT_BASE_URL;

pub const DEFAULT_MAX_PAGES: usize = 20;
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// On-disk shape of nm-compare.json. Every field is optional; missing
/// fields fall back to built-in defaults.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub max_pages: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub metrics: Option<Vec<MetricEntry>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MetricEntry {
    pub metric: Metric,
    #[serde(default)]
    pub remove_outliers: bool,
}

#[derive(Debug, Clone)]
pub struct MetricPlan {
    pub metric: Metric,
    pub remove_outliers: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub max_pages: usize,
    pub page_size: usize,
    pub base_url: String,
    pub metrics: Vec<MetricPlan>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads nm-compare.json when a path is given (or the default file
    /// exists), otherwise resolves built-in defaults. An explicit path
    /// that cannot be read is an error; the absent default file is not.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, MorphoError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("nm-compare.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Self::resolve_config(Config::default()));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| MorphoError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| MorphoError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> ResolvedConfig {
        let metrics = config
            .metrics
            .map(|entries| {
                entries
                    .into_iter()
                    .map(|entry| MetricPlan {
                        metric: entry.metric,
                        remove_outliers: entry.remove_outliers,
                    })
                    .collect()
            })
            .unwrap_or_else(default_metric_plans);

        ResolvedConfig {
            max_pages: config.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            page_size: config.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            metrics,
        }
    }
}

/// Default plan: volume and surface as-is, soma surface with Tukey
/// outlier fencing (soma tracings carry known measurement artifacts).
pub fn default_metric_plans() -> Vec<MetricPlan> {
    Metric::ALL
        .into_iter()
        .map(|metric| MetricPlan {
            metric,
            remove_outliers: metric == Metric::SomaSurface,
        })
        .collect()
}
