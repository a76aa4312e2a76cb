//! Dashboard handlers (HTML + SVG)

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use crate::view::{render_dashboard, solvency_chart, DashboardContext};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    pub company: Option<usize>,
}

/// Main page. Waits while a report is being generated.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Html<String>> {
    let portfolio = state.session.portfolio();
    let index = query.company.unwrap_or(0);
    let selected = portfolio
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", index)))?;

    let latest = state.latest_report.lock().await;
    let html = render_dashboard(&DashboardContext {
        records: portfolio.records(),
        selected,
        summary: portfolio.summary(),
        top_n: state.session.report_settings().top_n,
        latest_report: latest.as_ref(),
    });

    Ok(Html(html))
}

/// Solvency comparison chart
pub async fn solvency_svg(State(state): State<AppState>) -> impl IntoResponse {
    let svg = solvency_chart(state.session.portfolio().records());
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}
