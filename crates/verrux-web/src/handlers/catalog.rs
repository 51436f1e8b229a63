//! Supported input categories, discovered from the feature list at startup.

use axum::{extract::State, Json};
use serde::Serialize;
use verrux_common::patient::{MAX_AGE, MIN_AGE};
use verrux_common::{Gender, SideEffectSeverity};

use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub age: AgeRange,
    pub genders: Vec<Gender>,
    pub lesion_types: Vec<String>,
    pub treatment_methods: Vec<String>,
    pub side_effects: Vec<SideEffectSeverity>,
    pub strict_categories: bool,
}

/// GET /api/catalog: Form options
pub async fn api_catalog(State(state): State<SharedState>) -> Json<CatalogResponse> {
    let ctx = &state.context;
    let catalog = ctx.catalog();

    Json(CatalogResponse {
        age: AgeRange { min: MIN_AGE, max: MAX_AGE },
        genders: Gender::ALL.to_vec(),
        lesion_types: catalog.lesion_types().to_vec(),
        treatment_methods: catalog.treatment_methods().to_vec(),
        side_effects: SideEffectSeverity::ALL.to_vec(),
        strict_categories: ctx.settings().strict_categories,
    })
}
