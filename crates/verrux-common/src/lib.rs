//! verrux-common: Shared types and errors used across all Verrux crates.

pub mod error;
pub mod patient;

// Re-export commonly used types
pub use error::{ApiError, Result, VerruxError};
pub use patient::{Gender, PatientProfile, SideEffectSeverity, TreatmentRequest};
