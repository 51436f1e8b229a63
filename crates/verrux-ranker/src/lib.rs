//! verrux-ranker: Feature encoding, cost estimation and treatment ranking.

pub mod cost;
pub mod encoder;
pub mod engine;
pub mod report;

pub use cost::{CostEstimator, CostRange, CostTable};
pub use encoder::{encode, EncodingInput, FeatureVector};
pub use engine::{EngineSettings, PredictionContext, PredictionResult, Ranking};
pub use report::{format_success_rate, SuccessBanner};
