//! Treatment ranking API: scores every known method for a patient.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use verrux_common::{ApiError, PatientProfile};
use verrux_ranker::{format_success_rate, PredictionResult, SuccessBanner};

use crate::state::SharedState;

#[derive(Debug, Clone, Serialize)]
pub struct RankedTreatment {
    pub rank: usize,
    pub treatment_method: String,
    pub estimated_cost: u32,
    pub probability: f64,
    pub success_rate: String,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub treatments: Vec<RankedTreatment>,
    pub recommended: Option<RankedTreatment>,
    pub banner: Option<SuccessBanner>,
}

impl RankedTreatment {
    fn from_result(rank: usize, result: PredictionResult) -> Self {
        Self {
            rank,
            success_rate: format_success_rate(result.probability),
            estimated_cost: result.cost,
            probability: result.probability,
            treatment_method: result.treatment_method,
        }
    }
}

/// POST /api/rank: Rank all treatment methods for a patient
pub async fn api_rank(
    State(state): State<SharedState>,
    body: Result<Json<PatientProfile>, JsonRejection>,
) -> Result<Json<RankingResponse>, ApiError> {
    let Json(patient) = body?;
    let ctx = &state.context;

    let ranking = ctx.rank(&patient)?;
    let threshold = ctx.settings().success_threshold;

    let treatments: Vec<RankedTreatment> = ranking
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankedTreatment::from_result(i + 1, row))
        .collect();
    let recommended = treatments.first().cloned();
    let banner = recommended
        .as_ref()
        .map(|top| SuccessBanner::for_probability(top.probability, threshold));

    Ok(Json(RankingResponse { treatments, recommended, banner }))
}
