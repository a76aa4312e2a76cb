//! Company and model handlers (JSON)

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::logic::dataset::FinancialIndicators;
use crate::logic::scoring::{ModelSummary, ScoredRecord};
use crate::view::dashboard::verdict;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct CompanySummary {
    pub index: usize,
    pub name: String,
    pub predicted_label: u8,
    pub risk_probability: f64,
}

#[derive(Debug, Serialize)]
pub struct CompanyDetail {
    pub index: usize,
    pub name: String,
    pub indicators: FinancialIndicators,
    pub at_risk: bool,
    pub predicted_label: u8,
    pub risk_probability: f64,
    pub verdict: String,
}

impl From<&ScoredRecord> for CompanySummary {
    fn from(r: &ScoredRecord) -> Self {
        Self {
            index: r.row_index,
            name: r.company.name.clone(),
            predicted_label: r.predicted_label,
            risk_probability: r.risk_probability,
        }
    }
}

/// List every scored company, in table order
pub async fn list(State(state): State<AppState>) -> Json<Vec<CompanySummary>> {
    Json(
        state
            .session
            .portfolio()
            .records()
            .iter()
            .map(CompanySummary::from)
            .collect(),
    )
}

/// Indicators and verdict of one company
pub async fn get(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<CompanyDetail>> {
    let record = state
        .session
        .portfolio()
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", index)))?;

    Ok(Json(CompanyDetail {
        index: record.row_index,
        name: record.company.name.clone(),
        indicators: record.company.indicators,
        at_risk: record.company.at_risk,
        predicted_label: record.predicted_label,
        risk_probability: record.risk_probability,
        verdict: verdict(record).1,
    }))
}

/// Model configuration, in-sample accuracy and importances
pub async fn model(State(state): State<AppState>) -> Json<ModelSummary> {
    Json(state.session.portfolio().summary().clone())
}
