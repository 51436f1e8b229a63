//! Feature encoding: patient/treatment attributes → classifier feature space.

use tracing::debug;
use verrux_common::{Gender, SideEffectSeverity};
use verrux_model::catalog::{AGE_FEATURE, COST_FEATURE, MALE_FEATURE};
use verrux_model::FeatureCatalog;

/// Attributes for one encoded row.
#[derive(Debug, Clone, Copy)]
pub struct EncodingInput<'a> {
    pub age: u32,
    pub gender: Gender,
    pub lesion_type: &'a str,
    pub side_effects: SideEffectSeverity,
    pub treatment_method: &'a str,
    pub cost: u32,
}

/// Ordered feature name → value mapping aligned to the artifact list.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector<'c> {
    names: &'c [String],
    values: Vec<f64>,
}

impl<'c> FeatureVector<'c> {
    /// All-zero vector over the catalog's features.
    pub fn zeros(catalog: &'c FeatureCatalog) -> Self {
        Self {
            names: catalog.features(),
            values: vec![0.0; catalog.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> &[String] {
        self.names
    }

    /// Values in artifact feature order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == feature)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    fn set(&mut self, slot: Option<usize>, value: f64) {
        if let Some(i) = slot {
            self.values[i] = value;
        }
    }
}

/// Encode one row.
///
/// Features not explicitly set stay 0. A lesion type or treatment method with
/// no matching indicator slot contributes nothing; unless it is the dropped
/// baseline level this is logged at debug, never raised.
pub fn encode<'c>(catalog: &'c FeatureCatalog, input: &EncodingInput<'_>) -> FeatureVector<'c> {
    let mut vector = FeatureVector::zeros(catalog);

    vector.set(catalog.index_of(AGE_FEATURE), input.age as f64);
    vector.set(catalog.index_of(COST_FEATURE), input.cost as f64);

    if input.gender == Gender::Male {
        vector.set(catalog.index_of(MALE_FEATURE), 1.0);
    }

    match catalog.lesion_slot(input.lesion_type) {
        Some(slot) => vector.set(Some(slot), 1.0),
        None if catalog.baseline_lesion_type() == Some(input.lesion_type) => {}
        None => debug!(
            "Unknown lesion type '{}'; encoding it as no lesion-type signal",
            input.lesion_type
        ),
    }

    match catalog.method_slot(input.treatment_method) {
        Some(slot) => vector.set(Some(slot), 1.0),
        None if catalog.baseline_treatment_method() == Some(input.treatment_method) => {}
        None => debug!(
            "Unknown treatment method '{}'; encoding it as no treatment-method signal",
            input.treatment_method
        ),
    }

    vector.set(catalog.side_effect_slot(input.side_effects), 1.0);

    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use verrux_model::CatalogOptions;
    use verrux_test_utils::wart_feature_names;

    fn catalog() -> FeatureCatalog {
        FeatureCatalog::parse(&wart_feature_names(), &CatalogOptions::default()).unwrap()
    }

    fn input<'a>(lesion_type: &'a str, treatment_method: &'a str) -> EncodingInput<'a> {
        EncodingInput {
            age: 30,
            gender: Gender::Male,
            lesion_type,
            side_effects: SideEffectSeverity::None,
            treatment_method,
            cost: 3738,
        }
    }

    #[test]
    fn test_vector_matches_feature_list() {
        let catalog = catalog();
        let v = encode(&catalog, &input("Plantar", "Cryotherapy"));
        assert_eq!(v.len(), catalog.len());
        assert_eq!(v.names(), catalog.features());
    }

    #[test]
    fn test_sets_expected_slots() {
        let catalog = catalog();
        let v = encode(&catalog, &input("Plantar", "Laser"));
        assert_eq!(v.get("Age"), Some(30.0));
        assert_eq!(v.get("Treatment Cost"), Some(3738.0));
        assert_eq!(v.get("Gender_Male"), Some(1.0));
        assert_eq!(v.get("Wart Type_Plantar"), Some(1.0));
        assert_eq!(v.get("Treatment Method_Laser"), Some(1.0));
        assert_eq!(v.get("Side Effects_Mild"), Some(0.0));
        let hot: f64 = v.values().iter().skip(3).sum();
        assert_eq!(hot, 2.0);
    }

    #[test]
    fn test_female_and_baselines_are_all_zero_indicators() {
        let catalog = catalog();
        let mut row = input("Common", "Cryotherapy");
        row.gender = Gender::Female;
        let v = encode(&catalog, &row);
        assert!(v.iter().skip(2).all(|(_, value)| value == 0.0));
    }

    #[test]
    fn test_side_effect_indicators() {
        let catalog = catalog();
        let mut row = input("Flat", "Topical");
        row.side_effects = SideEffectSeverity::Severe;
        let v = encode(&catalog, &row);
        assert_eq!(v.get("Side Effects_Severe"), Some(1.0));
        assert_eq!(v.get("Side Effects_Mild"), Some(0.0));
    }

    #[test]
    fn test_unknown_lesion_type_zero_fills() {
        let catalog = catalog();
        let v = encode(&catalog, &input("Ringworm", "Topical"));
        assert!(v
            .iter()
            .filter(|(name, _)| name.starts_with("Wart Type_"))
            .all(|(_, value)| value == 0.0));
        assert_eq!(v.get("Treatment Method_Topical"), Some(1.0));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let catalog = catalog();
        let a = encode(&catalog, &input("Mosaic", "Surgical"));
        let b = encode(&catalog, &input("Mosaic", "Surgical"));
        let bits = |v: &FeatureVector| v.values().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }
}
