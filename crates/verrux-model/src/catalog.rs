//! Typed view over the artifact feature-name list.
//!
//! The training pipeline one-hot encodes categorical columns as
//! `<Column>_<value>` and drops the first level of each column. Parsing the
//! list once recovers the supported lesion types and treatment methods; the
//! dropped baseline level cannot be recovered from the list and comes from
//! configuration instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verrux_common::{Result, SideEffectSeverity, VerruxError};

pub const AGE_FEATURE: &str = "Age";
pub const COST_FEATURE: &str = "Treatment Cost";
pub const MALE_FEATURE: &str = "Gender_Male";
pub const LESION_PREFIX: &str = "Wart Type_";
pub const METHOD_PREFIX: &str = "Treatment Method_";
pub const SIDE_EFFECT_PREFIX: &str = "Side Effects_";

/// Baseline levels dropped from each one-hot group at training time.
///
/// An empty string means the group has no dropped level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOptions {
    #[serde(default = "default_baseline_lesion")]
    pub baseline_lesion_type: Option<String>,
    #[serde(default = "default_baseline_method")]
    pub baseline_treatment_method: Option<String>,
}

fn default_baseline_lesion() -> Option<String> { Some("Common".to_string()) }
fn default_baseline_method() -> Option<String> { Some("Cryotherapy".to_string()) }

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            baseline_lesion_type: default_baseline_lesion(),
            baseline_treatment_method: default_baseline_method(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    features: Vec<String>,
    index: HashMap<String, usize>,
    lesion_types: Vec<String>,
    treatment_methods: Vec<String>,
    baseline_lesion_type: Option<String>,
    baseline_treatment_method: Option<String>,
}

impl FeatureCatalog {
    /// Parse the ordered feature-name list.
    ///
    /// Fails on an empty list, blank or duplicate names, an indicator with an
    /// empty category, an unknown side-effect level, or a list without any
    /// treatment-method indicator (ranking would have nothing to compare).
    pub fn parse(features: &[String], options: &CatalogOptions) -> Result<Self> {
        if features.is_empty() {
            return Err(VerruxError::Catalog("feature list is empty".to_string()));
        }

        let mut index = HashMap::with_capacity(features.len());
        let mut discovered_lesions = Vec::new();
        let mut discovered_methods = Vec::new();

        for (i, name) in features.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(VerruxError::Catalog(format!("feature {i} has a blank name")));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(VerruxError::Catalog(format!("duplicate feature '{name}'")));
            }

            if let Some(value) = name.strip_prefix(LESION_PREFIX) {
                discovered_lesions.push(non_empty_category(name, value)?);
            } else if let Some(value) = name.strip_prefix(METHOD_PREFIX) {
                discovered_methods.push(non_empty_category(name, value)?);
            } else if let Some(value) = name.strip_prefix(SIDE_EFFECT_PREFIX) {
                if !matches!(value, "Mild" | "Severe") {
                    return Err(VerruxError::Catalog(format!(
                        "unsupported side-effect indicator '{value}'"
                    )));
                }
            }
        }

        if discovered_methods.is_empty() {
            return Err(VerruxError::Catalog(format!(
                "no '{METHOD_PREFIX}*' indicators in feature list"
            )));
        }
        let baseline_lesion = configured_baseline(&options.baseline_lesion_type);
        let baseline_method = configured_baseline(&options.baseline_treatment_method);

        let lesion_types = with_baseline(&baseline_lesion, discovered_lesions, "lesion type");
        let treatment_methods = with_baseline(&baseline_method, discovered_methods, "treatment method");

        for numeric in [AGE_FEATURE, COST_FEATURE] {
            if !index.contains_key(numeric) {
                warn!("Feature list has no '{numeric}' slot; that input will be ignored");
            }
        }

        debug!(
            "Feature catalog: {} features, {} lesion types, {} treatment methods",
            features.len(),
            lesion_types.len(),
            treatment_methods.len()
        );

        Ok(Self {
            features: features.to_vec(),
            index,
            lesion_types,
            treatment_methods,
            baseline_lesion_type: baseline_lesion,
            baseline_treatment_method: baseline_method,
        })
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn index_of(&self, feature: &str) -> Option<usize> {
        self.index.get(feature).copied()
    }

    /// Supported lesion types, baseline first.
    pub fn lesion_types(&self) -> &[String] {
        &self.lesion_types
    }

    /// Supported treatment methods, baseline first; this is the ranking order.
    pub fn treatment_methods(&self) -> &[String] {
        &self.treatment_methods
    }

    pub fn baseline_lesion_type(&self) -> Option<&str> {
        self.baseline_lesion_type.as_deref()
    }

    pub fn baseline_treatment_method(&self) -> Option<&str> {
        self.baseline_treatment_method.as_deref()
    }

    pub fn lesion_slot(&self, lesion_type: &str) -> Option<usize> {
        self.index_of(&format!("{LESION_PREFIX}{lesion_type}"))
    }

    pub fn method_slot(&self, method: &str) -> Option<usize> {
        self.index_of(&format!("{METHOD_PREFIX}{method}"))
    }

    pub fn side_effect_slot(&self, severity: SideEffectSeverity) -> Option<usize> {
        match severity {
            SideEffectSeverity::None => None,
            level => self.index_of(&format!("{SIDE_EFFECT_PREFIX}{}", level.as_str())),
        }
    }

    pub fn is_known_lesion_type(&self, lesion_type: &str) -> bool {
        self.lesion_types.iter().any(|l| l == lesion_type)
    }

    pub fn is_known_treatment_method(&self, method: &str) -> bool {
        self.treatment_methods.iter().any(|m| m == method)
    }
}

fn non_empty_category(name: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(VerruxError::Catalog(format!("indicator '{name}' has no category")));
    }
    Ok(value.to_string())
}

fn configured_baseline(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
}

fn with_baseline(baseline: &Option<String>, discovered: Vec<String>, field: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(discovered.len() + 1);
    if let Some(b) = baseline {
        if discovered.contains(b) {
            warn!("Baseline {field} '{b}' has its own indicator slot; treating it as a regular category");
        } else {
            out.push(b.clone());
        }
    }
    out.extend(discovered);
    out
}
