//! Heuristic treatment cost estimation.
//!
//! cost = round(midpoint(low, high) × lesion factor × side-effect factor)
//!
//! Factors are converted to basis points once and the product is evaluated
//! in integer arithmetic, so the same inputs always give the same integer and
//! half-way values round up (3250 × 1.15 = 3737.5 rounds to 3738).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;
use verrux_common::{Result, SideEffectSeverity, VerruxError};

const BASIS_POINTS: u128 = 10_000;
const MAX_FACTOR: f64 = 1_000.0;

/// Currency range (low, high) for a treatment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: u32,
    pub high: u32,
}

impl CostRange {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityFactors {
    #[serde(default = "unit_factor")]
    pub none: f64,
    #[serde(default = "default_mild_factor")]
    pub mild: f64,
    #[serde(default = "default_severe_factor")]
    pub severe: f64,
}

fn unit_factor() -> f64 { 1.0 }
fn default_mild_factor() -> f64 { 1.10 }
fn default_severe_factor() -> f64 { 1.25 }

impl Default for SeverityFactors {
    fn default() -> Self {
        Self {
            none: unit_factor(),
            mild: default_mild_factor(),
            severe: default_severe_factor(),
        }
    }
}

/// Lookup table and multipliers, overridable from `[cost]` in verrux.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostTable {
    /// Used for methods missing from `methods`.
    #[serde(default = "default_range")]
    pub default_range: CostRange,
    #[serde(default = "default_methods")]
    pub methods: BTreeMap<String, CostRange>,
    /// Lesion types not listed use 1.0.
    #[serde(default = "default_lesion_factors")]
    pub lesion_factors: BTreeMap<String, f64>,
    #[serde(default)]
    pub severity_factors: SeverityFactors,
}

fn default_range() -> CostRange { CostRange::new(500, 15_000) }

fn default_methods() -> BTreeMap<String, CostRange> {
    [
        ("Cryotherapy",    CostRange::new(1_500, 5_000)),
        ("Immunotherapy",  CostRange::new(4_000, 12_000)),
        ("Topical",        CostRange::new(300, 1_500)),
        ("Electrosurgery", CostRange::new(3_000, 8_000)),
        ("Salicylic Acid", CostRange::new(100, 600)),
        ("Surgical",       CostRange::new(6_000, 15_000)),
        ("Laser",          CostRange::new(8_000, 20_000)),
    ]
    .into_iter()
    .map(|(m, r)| (m.to_string(), r))
    .collect()
}

fn default_lesion_factors() -> BTreeMap<String, f64> {
    [("Plantar", 1.15), ("Mosaic", 1.20), ("Genital", 1.25)]
        .into_iter()
        .map(|(l, f)| (l.to_string(), f))
        .collect()
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            default_range: default_range(),
            methods: default_methods(),
            lesion_factors: default_lesion_factors(),
            severity_factors: SeverityFactors::default(),
        }
    }
}

/// Pure cost estimator built from a validated `CostTable`.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    default_range: CostRange,
    methods: HashMap<String, CostRange>,
    lesion_bp: HashMap<String, u128>,
    severity_bp: [u128; 3],
}

impl CostEstimator {
    pub fn new(table: &CostTable) -> Result<Self> {
        validate_range("default", &table.default_range)?;
        for (method, range) in &table.methods {
            validate_range(method, range)?;
        }

        let lesion_bp = table
            .lesion_factors
            .iter()
            .map(|(lesion, factor)| Ok((lesion.clone(), to_basis_points(lesion, *factor)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        let sev = &table.severity_factors;
        let severity_bp = [
            to_basis_points("side effects none", sev.none)?,
            to_basis_points("side effects mild", sev.mild)?,
            to_basis_points("side effects severe", sev.severe)?,
        ];

        Ok(Self {
            default_range: table.default_range,
            methods: table.methods.iter().map(|(m, r)| (m.clone(), *r)).collect(),
            lesion_bp,
            severity_bp,
        })
    }

    /// Range for a method, falling back to the wide default.
    pub fn range_for(&self, method: &str) -> CostRange {
        match self.methods.get(method) {
            Some(range) => *range,
            None => {
                debug!("No cost range for treatment method '{method}', using default");
                self.default_range
            }
        }
    }

    pub fn lesion_factor(&self, lesion_type: &str) -> f64 {
        self.lesion_bp_for(lesion_type) as f64 / BASIS_POINTS as f64
    }

    pub fn severity_factor(&self, severity: SideEffectSeverity) -> f64 {
        self.severity_bp_for(severity) as f64 / BASIS_POINTS as f64
    }

    /// Estimated cost for one (method, lesion type, severity) combination.
    pub fn estimate(&self, method: &str, lesion_type: &str, severity: SideEffectSeverity) -> u32 {
        let range = self.range_for(method);
        // midpoint × lesion × severity, with the /2 folded into the denominator
        let numerator = (range.low as u128 + range.high as u128)
            * self.lesion_bp_for(lesion_type)
            * self.severity_bp_for(severity);
        let denominator = 2 * BASIS_POINTS * BASIS_POINTS;
        let rounded = (numerator + denominator / 2) / denominator;
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    fn lesion_bp_for(&self, lesion_type: &str) -> u128 {
        self.lesion_bp.get(lesion_type).copied().unwrap_or(BASIS_POINTS)
    }

    fn severity_bp_for(&self, severity: SideEffectSeverity) -> u128 {
        match severity {
            SideEffectSeverity::None => self.severity_bp[0],
            SideEffectSeverity::Mild => self.severity_bp[1],
            SideEffectSeverity::Severe => self.severity_bp[2],
        }
    }
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self::new(&CostTable::default()).expect("default cost table is valid")
    }
}

fn validate_range(name: &str, range: &CostRange) -> Result<()> {
    if range.low > range.high {
        return Err(VerruxError::Config(format!(
            "cost range for '{name}' has low {} above high {}",
            range.low, range.high
        )));
    }
    Ok(())
}

fn to_basis_points(name: &str, factor: f64) -> Result<u128> {
    if !factor.is_finite() || !(0.0..=MAX_FACTOR).contains(&factor) {
        return Err(VerruxError::Config(format!(
            "cost factor for '{name}' must be between 0 and {MAX_FACTOR}, got {factor}"
        )));
    }
    Ok((factor * BASIS_POINTS as f64).round() as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plantar_cryotherapy_rounds_half_up() {
        let costs = CostEstimator::default();
        // round(3250 × 1.15 × 1.0)
        assert_eq!(costs.estimate("Cryotherapy", "Plantar", SideEffectSeverity::None), 3738);
    }

    #[test]
    fn test_baseline_is_midpoint() {
        let costs = CostEstimator::default();
        assert_eq!(costs.estimate("Cryotherapy", "Common", SideEffectSeverity::None), 3250);
        assert_eq!(costs.estimate("Salicylic Acid", "Flat", SideEffectSeverity::None), 350);
    }

    #[test]
    fn test_unknown_method_uses_default_range() {
        let costs = CostEstimator::default();
        assert_eq!(costs.range_for("Duct Tape"), CostRange::new(500, 15_000));
        assert_eq!(costs.estimate("Duct Tape", "Common", SideEffectSeverity::None), 7750);
    }

    #[test]
    fn test_factors_multiply() {
        let costs = CostEstimator::default();
        // 3250 × 1.25 × 1.25 = 5078.125
        assert_eq!(costs.estimate("Cryotherapy", "Genital", SideEffectSeverity::Severe), 5078);
        // 900 × 1.10 = 990
        assert_eq!(costs.estimate("Topical", "Common", SideEffectSeverity::Mild), 990);
    }

    #[test]
    fn test_estimate_is_pure() {
        let costs = CostEstimator::default();
        for severity in SideEffectSeverity::ALL {
            let a = costs.estimate("Laser", "Mosaic", severity);
            let b = costs.estimate("Laser", "Mosaic", severity);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_zero_range_gives_zero() {
        let mut table = CostTable::default();
        table.methods.insert("Observation".to_string(), CostRange::new(0, 0));
        let costs = CostEstimator::new(&table).unwrap();
        assert_eq!(costs.estimate("Observation", "Genital", SideEffectSeverity::Severe), 0);
    }

    #[test]
    fn test_invalid_table_rejected() {
        let mut table = CostTable::default();
        table.methods.insert("Broken".to_string(), CostRange::new(10, 5));
        assert!(CostEstimator::new(&table).is_err());

        let mut table = CostTable::default();
        table.lesion_factors.insert("Flat".to_string(), -1.0);
        assert!(CostEstimator::new(&table).is_err());
    }
}
