//! Prediction and ranking over an immutable `PredictionContext`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use verrux_common::{PatientProfile, Result, TreatmentRequest, VerruxError};
use verrux_model::{CatalogOptions, FeatureCatalog, ModelArtifacts};

use crate::cost::CostEstimator;
use crate::encoder::{encode, EncodingInput, FeatureVector};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Probability at or above which a treatment counts as likely successful.
    pub success_threshold: f64,
    /// Reject unknown lesion types / methods instead of zero-filling them.
    pub strict_categories: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            success_threshold: 0.5,
            strict_categories: false,
        }
    }
}

/// Everything a request needs, loaded once and never mutated.
#[derive(Debug)]
pub struct PredictionContext {
    artifacts: ModelArtifacts,
    catalog: FeatureCatalog,
    costs: CostEstimator,
    settings: EngineSettings,
}

/// Outcome of scoring one treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub treatment_method: String,
    pub probability: f64,
    pub cost: u32,
}

impl PredictionResult {
    pub fn is_high_success(&self, threshold: f64) -> bool {
        self.probability >= threshold
    }
}

/// All known methods sorted by success probability, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub rows: Vec<PredictionResult>,
}

impl Ranking {
    pub fn recommended(&self) -> Option<&PredictionResult> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PredictionContext {
    pub fn new(
        artifacts: ModelArtifacts,
        catalog_options: &CatalogOptions,
        costs: CostEstimator,
        settings: EngineSettings,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&settings.success_threshold) {
            return Err(VerruxError::Config(format!(
                "success threshold must be within [0, 1], got {}",
                settings.success_threshold
            )));
        }
        let catalog = FeatureCatalog::parse(artifacts.feature_names(), catalog_options)?;
        info!(
            "Prediction context ready: {} lesion types, {} treatment methods",
            catalog.lesion_types().len(),
            catalog.treatment_methods().len()
        );
        Ok(Self { artifacts, catalog, costs, settings })
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn costs(&self) -> &CostEstimator {
        &self.costs
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// P(success) for one encoded vector.
    ///
    /// A vector that does not match the artifact shape is a wiring error, not
    /// something to recover from.
    pub fn score(&self, vector: &FeatureVector<'_>) -> Result<f64> {
        let expected = self.artifacts.scaler().n_features();
        if vector.len() != expected || vector.names() != self.artifacts.feature_names() {
            return Err(VerruxError::ShapeMismatch {
                expected,
                actual: vector.len(),
            });
        }

        let scaled = self.artifacts.scaler().transform(vector.values())?;
        let probability = self.artifacts.classifier().predict_proba(&scaled)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(VerruxError::Model(format!(
                "classifier returned probability {probability} outside [0, 1]"
            )));
        }
        Ok(probability)
    }

    /// Score a single patient + treatment pairing.
    pub fn predict(&self, request: &TreatmentRequest) -> Result<PredictionResult> {
        let patient = &request.patient;
        self.check_patient(patient)?;
        self.check_method(&request.treatment_method)?;

        let cost = request.cost_override.unwrap_or_else(|| {
            self.costs
                .estimate(&request.treatment_method, &patient.lesion_type, patient.side_effects)
        });

        self.evaluate(patient, &request.treatment_method, cost)
    }

    /// Score every known treatment method for the patient and sort by
    /// probability, descending. Ties keep catalog order.
    pub fn rank(&self, patient: &PatientProfile) -> Result<Ranking> {
        self.check_patient(patient)?;

        let mut rows = self
            .catalog
            .treatment_methods()
            .iter()
            .map(|method| {
                let cost = self
                    .costs
                    .estimate(method, &patient.lesion_type, patient.side_effects);
                self.evaluate(patient, method, cost)
            })
            .collect::<Result<Vec<_>>>()?;

        rows.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(top) = rows.first() {
            debug!(
                "Ranked {} methods for lesion '{}'; recommended {} ({:.3})",
                rows.len(),
                patient.lesion_type,
                top.treatment_method,
                top.probability
            );
        }

        Ok(Ranking { rows })
    }

    fn evaluate(&self, patient: &PatientProfile, method: &str, cost: u32) -> Result<PredictionResult> {
        let vector = encode(
            &self.catalog,
            &EncodingInput {
                age: patient.age,
                gender: patient.gender,
                lesion_type: &patient.lesion_type,
                side_effects: patient.side_effects,
                treatment_method: method,
                cost,
            },
        );
        let probability = self.score(&vector)?;
        Ok(PredictionResult {
            treatment_method: method.to_string(),
            probability,
            cost,
        })
    }

    /// Validates the patient; an unknown lesion type is rejected in strict
    /// mode and otherwise warned about once per request.
    fn check_patient(&self, patient: &PatientProfile) -> Result<()> {
        patient.validate()?;
        if !self.catalog.is_known_lesion_type(&patient.lesion_type) {
            if self.settings.strict_categories {
                return Err(VerruxError::UnknownCategory {
                    field: "lesion type",
                    value: patient.lesion_type.clone(),
                });
            }
            warn!(
                "Unknown lesion type '{}'; scoring without a lesion-type signal",
                patient.lesion_type
            );
        }
        Ok(())
    }

    fn check_method(&self, method: &str) -> Result<()> {
        if !self.catalog.is_known_treatment_method(method) {
            if self.settings.strict_categories {
                return Err(VerruxError::UnknownCategory {
                    field: "treatment method",
                    value: method.to_string(),
                });
            }
            warn!("Unknown treatment method '{method}'; scoring without a treatment-method signal");
        }
        Ok(())
    }
}
