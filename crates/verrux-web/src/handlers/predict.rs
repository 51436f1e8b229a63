//! Single prediction API: scores one patient + treatment pairing.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use verrux_common::{ApiError, TreatmentRequest};
use verrux_ranker::{format_success_rate, SuccessBanner};

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub treatment_method: String,
    pub estimated_cost: u32,
    pub probability: f64,
    pub success_rate: String,
    pub high_success: bool,
    pub banner: SuccessBanner,
    pub message: &'static str,
}

/// POST /api/predict: Predict treatment success for one method
pub async fn api_predict(
    State(state): State<SharedState>,
    body: Result<Json<TreatmentRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = body?;
    let ctx = &state.context;

    let result = ctx.predict(&request)?;
    let threshold = ctx.settings().success_threshold;
    let banner = SuccessBanner::for_probability(result.probability, threshold);

    info!(
        "Predicted {} for {} lesion: p={:.3}",
        result.treatment_method, request.patient.lesion_type, result.probability
    );

    Ok(Json(PredictionResponse {
        success_rate: format_success_rate(result.probability),
        high_success: result.is_high_success(threshold),
        message: banner.message(),
        banner,
        estimated_cost: result.cost,
        probability: result.probability,
        treatment_method: result.treatment_method,
    }))
}
