//! verrux-test-utils: In-memory model artifacts for tests.
//!
//! The fixtures mirror the exported wart-treatment model: the numeric slots,
//! a `Gender_Male` indicator, and one-hot groups with `Common` and
//! `Cryotherapy` as the dropped baselines.

use verrux_common::Result;
use verrux_model::{FeatureScaler, LogisticModel, ModelArtifacts, SuccessClassifier};

pub const LESION_TYPES: [&str; 6] = ["Butchers", "Filiform", "Flat", "Genital", "Mosaic", "Plantar"];
pub const TREATMENT_METHODS: [&str; 6] = [
    "Electrosurgery",
    "Immunotherapy",
    "Laser",
    "Salicylic Acid",
    "Surgical",
    "Topical",
];

/// Feature list in the order the training pipeline exports it.
pub fn wart_feature_names() -> Vec<String> {
    let mut names = vec![
        "Age".to_string(),
        "Treatment Cost".to_string(),
        "Gender_Male".to_string(),
    ];
    names.extend(LESION_TYPES.iter().map(|l| format!("Wart Type_{l}")));
    names.extend(TREATMENT_METHODS.iter().map(|m| format!("Treatment Method_{m}")));
    names.push("Side Effects_Mild".to_string());
    names.push("Side Effects_Severe".to_string());
    names
}

/// Passes rows through unchanged.
pub struct IdentityScaler {
    pub n_features: usize,
}

impl FeatureScaler for IdentityScaler {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>> {
        Ok(row.to_vec())
    }
}

/// Returns the same probability for every row.
pub struct FixedClassifier {
    pub probability: f64,
    pub n_features: usize,
}

impl SuccessClassifier for FixedClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, _row: &[f64]) -> Result<f64> {
        Ok(self.probability)
    }
}

/// Artifacts whose classifier always answers `probability`.
pub fn fixed_artifacts(probability: f64) -> ModelArtifacts {
    let names = wart_feature_names();
    let n = names.len();
    ModelArtifacts::from_parts(
        Box::new(FixedClassifier { probability, n_features: n }),
        Box::new(IdentityScaler { n_features: n }),
        names,
    )
    .expect("fixture artifacts are consistent")
}

/// Logistic artifacts over the wart feature list with an identity scaler.
///
/// `weights` names the features with non-zero coefficients; everything else
/// gets 0.
pub fn logistic_artifacts(weights: &[(&str, f64)], intercept: f64) -> ModelArtifacts {
    let names = wart_feature_names();
    let coefficients = names
        .iter()
        .map(|name| {
            weights
                .iter()
                .find(|(feature, _)| feature == name)
                .map(|(_, w)| *w)
                .unwrap_or(0.0)
        })
        .collect();
    let model = LogisticModel::new(coefficients, intercept).expect("fixture model is valid");
    let n = names.len();
    ModelArtifacts::from_parts(Box::new(model), Box::new(IdentityScaler { n_features: n }), names)
        .expect("fixture artifacts are consistent")
}
