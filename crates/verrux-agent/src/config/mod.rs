//! Configuration loading for Verrux.
//! Reads verrux.toml from the current directory or path in VERRUX_CONFIG env var.
//! A missing file means all defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verrux_model::{ArtifactFiles, CatalogOptions};
use verrux_ranker::{CostTable, EngineSettings};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub cost: CostTable,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,
    #[serde(flatten)]
    pub files: ArtifactFiles,
}

fn default_model_dir() -> PathBuf { PathBuf::from("./model") }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: default_model_dir(),
            files: ArtifactFiles::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(flatten)]
    pub baselines: CatalogOptions,
    #[serde(default)]
    pub strict_categories: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f64,
}

fn default_success_threshold() -> f64 { EngineSettings::default().success_threshold }

impl Default for PredictionConfig {
    fn default() -> Self {
        Self { success_threshold: default_success_threshold() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}


impl Config {
    /// Load configuration from `path`, or from VERRUX_CONFIG / ./verrux.toml.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("VERRUX_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("verrux.toml")),
        };

        if !path.exists() {
            tracing::info!("No config file at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        tracing::info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            success_threshold: self.prediction.success_threshold,
            strict_categories: self.catalog.strict_categories,
        }
    }
}
