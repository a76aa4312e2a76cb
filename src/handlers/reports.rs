//! Report handlers

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;

use crate::logic::GeneratedReport;
use crate::{AppError, AppResult, AppState};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Deserialize, Default)]
pub struct GenerateReportRequest {
    pub top_n: Option<usize>,
}

/// Generate while holding the report slot, so concurrent presses and
/// page renders wait for the current generation.
async fn generate(state: &AppState, top_n: usize) -> AppResult<GeneratedReport> {
    if top_n == 0 {
        return Err(AppError::ValidationError("top_n must be at least 1".to_string()));
    }

    let mut slot = state.latest_report.lock().await;
    let report = state.session.generate_report(top_n).await?;

    tracing::info!(
        "Report {} ready: {} sections, {} failed narratives",
        report.id,
        report.sections,
        report.failed_narratives
    );
    *slot = Some(report.clone());
    Ok(report)
}

/// Empty body means defaults; anything else must be a valid request
fn parse_request(body: &[u8]) -> AppResult<GenerateReportRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateReportRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("Invalid report request: {}", e)))
}

/// Generate a report (JSON API)
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<GeneratedReport>> {
    let request = parse_request(&body)?;
    let top_n = request
        .top_n
        .unwrap_or(state.session.report_settings().top_n);

    Ok(Json(generate(&state, top_n).await?))
}

/// Dashboard button: generate with the default N, back to the page
pub async fn create_from_form(State(state): State<AppState>) -> AppResult<Redirect> {
    let top_n = state.session.report_settings().top_n;
    generate(&state, top_n).await?;
    Ok(Redirect::to("/"))
}

/// Download the last generated report
pub async fn download(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let latest = state.latest_report.lock().await;
    let report = latest
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No report generated yet".to_string()))?;

    let bytes = tokio::fs::read(&report.path)
        .await
        .map_err(|e| AppError::InternalError(format!("Cannot read {}: {}", report.path.display(), e)))?;

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
