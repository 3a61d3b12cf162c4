//! Runtime configuration: where the artifacts live and how prices are shown.

use crate::display::PriceFormatter;
use crate::error::{EstimatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// File the binary looks for in its working directory.
pub const CONFIG_FILE: &str = "estimator.json";

/// Snapshot of configuration values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Serialized predictor.
    pub model_path: PathBuf,
    /// Serialized encoding tables.
    pub encoders_path: PathBuf,
    pub display: PriceFormatter,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            model_path: PathBuf::from("house_price_model.bin"),
            encoders_path: PathBuf::from("label_encoders.json"),
            display: PriceFormatter::default(),
        }
    }
}

impl EstimatorConfig {
    /// Read a JSON config file. Relative artifact paths are taken relative to
    /// the file's own directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let config: EstimatorConfig = serde_json::from_slice(&bytes).map_err(|e| {
            EstimatorError::SerializationError(format!("{}: {}", path.display(), e))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// [`EstimatorConfig::load`] if `path` exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!(path = %path.display(), "loading configuration");
            Self::load(path)
        } else {
            info!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Anchor relative artifact paths at `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [&mut self.model_path, &mut self.encoders_path] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}
