//! Patient and treatment attributes collected for a prediction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerruxError};

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(alias = "male")]
    Male,
    #[serde(alias = "female")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = VerruxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(VerruxError::InvalidInput(format!("unknown gender '{other}'"))),
        }
    }
}

/// Side-effect severity reported for the treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SideEffectSeverity {
    #[default]
    #[serde(alias = "none")]
    None,
    #[serde(alias = "mild")]
    Mild,
    #[serde(alias = "severe")]
    Severe,
}

impl SideEffectSeverity {
    pub const ALL: [SideEffectSeverity; 3] = [
        SideEffectSeverity::None,
        SideEffectSeverity::Mild,
        SideEffectSeverity::Severe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SideEffectSeverity::None => "None",
            SideEffectSeverity::Mild => "Mild",
            SideEffectSeverity::Severe => "Severe",
        }
    }
}

impl fmt::Display for SideEffectSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SideEffectSeverity {
    type Err = VerruxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(SideEffectSeverity::None),
            "mild" => Ok(SideEffectSeverity::Mild),
            "severe" => Ok(SideEffectSeverity::Severe),
            other => Err(VerruxError::InvalidInput(format!(
                "unknown side-effect severity '{other}'"
            ))),
        }
    }
}

/// Patient attributes shared by every candidate treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub age: u32,
    pub gender: Gender,
    pub lesion_type: String,
    #[serde(default)]
    pub side_effects: SideEffectSeverity,
}

impl PatientProfile {
    /// Check the numeric range constraints of the input form.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(VerruxError::InvalidInput(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}, got {}",
                self.age
            )));
        }
        Ok(())
    }
}

/// A single patient + treatment pairing to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRequest {
    #[serde(flatten)]
    pub patient: PatientProfile,
    pub treatment_method: String,
    /// Manual cost entry; the estimator fills it in when absent.
    #[serde(default)]
    pub cost_override: Option<u32>,
}
