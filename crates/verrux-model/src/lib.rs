//! verrux-model: Loading and evaluating the pre-trained model artifacts.
//!
//! The classifier, scaler and feature list are produced offline and exported
//! as JSON. Everything here is read-only once loaded.

pub mod artifacts;
pub mod catalog;
pub mod classifier;
pub mod scaler;

pub use artifacts::{ArtifactFiles, ModelArtifacts};
pub use catalog::{CatalogOptions, FeatureCatalog};
pub use classifier::{LogisticModel, SuccessClassifier};
pub use scaler::{FeatureScaler, StandardScaler};
