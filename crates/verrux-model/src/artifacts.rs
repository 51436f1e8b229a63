//! Artifact loading.
//!
//! Three files live in the model directory:
//! - `logistic_model.json`: `{"coefficients": [...], "intercept": f64}`
//! - `scaler.json`: `{"mean": [...], "scale": [...]}`
//! - `features.json`: `["Age", "Treatment Cost", ...]`
//!
//! Any failure here is fatal at startup: nothing can be served without them.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;
use verrux_common::{Result, VerruxError};

use crate::classifier::{LogisticModel, SuccessClassifier};
use crate::scaler::{FeatureScaler, StandardScaler};

/// File names inside the model directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFiles {
    #[serde(default = "default_classifier_file")]
    pub classifier: String,
    #[serde(default = "default_scaler_file")]
    pub scaler: String,
    #[serde(default = "default_features_file")]
    pub features: String,
}

fn default_classifier_file() -> String { "logistic_model.json".to_string() }
fn default_scaler_file()     -> String { "scaler.json".to_string() }
fn default_features_file()   -> String { "features.json".to_string() }

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            classifier: default_classifier_file(),
            scaler: default_scaler_file(),
            features: default_features_file(),
        }
    }
}

/// The loaded, immutable model artifacts.
pub struct ModelArtifacts {
    classifier: Box<dyn SuccessClassifier>,
    scaler: Box<dyn FeatureScaler>,
    feature_names: Vec<String>,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("n_features", &self.feature_names.len())
            .finish_non_exhaustive()
    }
}

impl ModelArtifacts {
    /// Assemble artifacts from already-built parts, checking that all three
    /// agree on the number of features.
    pub fn from_parts(
        classifier: Box<dyn SuccessClassifier>,
        scaler: Box<dyn FeatureScaler>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        let n = feature_names.len();
        if scaler.n_features() != n {
            return Err(VerruxError::Model(format!(
                "scaler expects {} features but the feature list has {n}",
                scaler.n_features()
            )));
        }
        if classifier.n_features() != n {
            return Err(VerruxError::Model(format!(
                "classifier expects {} features but the feature list has {n}",
                classifier.n_features()
            )));
        }
        Ok(Self { classifier, scaler, feature_names })
    }

    /// Load the three JSON artifacts from `dir`.
    pub fn load(dir: impl AsRef<Path>, files: &ArtifactFiles) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Loading model artifacts from {}", dir.display());

        let model: LogisticModel = read_json(&dir.join(&files.classifier))?;
        model
            .validate()
            .map_err(|e| VerruxError::artifact(files.classifier.clone(), e.to_string()))?;

        let scaler: StandardScaler = read_json(&dir.join(&files.scaler))?;
        scaler
            .validate()
            .map_err(|e| VerruxError::artifact(files.scaler.clone(), e.to_string()))?;

        let feature_names: Vec<String> = read_json(&dir.join(&files.features))?;

        let artifacts = Self::from_parts(Box::new(model), Box::new(scaler), feature_names)?;
        info!("Model artifacts loaded: {} features", artifacts.feature_names.len());
        Ok(artifacts)
    }

    pub fn classifier(&self) -> &dyn SuccessClassifier {
        self.classifier.as_ref()
    }

    pub fn scaler(&self) -> &dyn FeatureScaler {
        self.scaler.as_ref()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VerruxError::artifact(path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&content)
        .map_err(|e| VerruxError::artifact(path.display().to_string(), e.to_string()))
}
