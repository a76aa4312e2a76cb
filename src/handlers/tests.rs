//! Router tests
//!
//! Requests go through the full router with an in-process narrative backend.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::logic::dataset::fixtures::sample_portfolio;
use crate::logic::model::ForestConfig;
use crate::logic::narrative::testing::ScriptedGenerator;
use crate::logic::narrative::{NarrativeGenerator, NarrativeSettings};
use crate::logic::session::ReportSettings;
use crate::logic::Session;
use crate::{create_router, AppState};

fn app(dir: &tempfile::TempDir) -> Router {
    let session = Session::from_records(
        sample_portfolio(),
        &ForestConfig::default(),
        NarrativeGenerator::new(Arc::new(ScriptedGenerator::default()), NarrativeSettings::default()),
        ReportSettings {
            top_n: 3,
            output_path: dir.path().join("rapport_assurances_ia.docx"),
        },
    )
    .unwrap();
    create_router(AppState::new(session))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(&app(&dir), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["companies"], 12);
}

#[tokio::test]
async fn test_company_list_and_detail() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let (status, body) = send(&app, get("/api/v1/companies")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body).as_array().unwrap().len(), 12);

    let (status, body) = send(&app, get("/api/v1/companies/1")).await;
    assert_eq!(status, StatusCode::OK);
    let detail = json(&body);
    assert_eq!(detail["name"], "Sahel Garantie");
    assert_eq!(detail["indicators"]["branch_count"], 4);
    assert_eq!(detail["predicted_label"], 1);
    assert!(detail["verdict"].as_str().unwrap().contains("Risque détecté"));

    let (status, body) = send(&app, get("/api/v1/companies/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["status"], 404);
}

#[tokio::test]
async fn test_model_summary_flags_in_sample_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(&app(&dir), get("/api/v1/model")).await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["n_trees"], 100);
    assert!(body["accuracy_note"].as_str().unwrap().contains("optimiste"));
    assert_eq!(body["importances"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_dashboard_and_chart() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let (status, body) = send(&app, get("/?company=2")).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(r#"<option value="2" selected>Baobab Mutuelle</option>"#));
    assert!(html.contains("Aucun risque détecté"));

    let (status, _) = send(&app, get("/?company=40")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(get("/charts/solvency.svg")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
}

#[tokio::test]
async fn test_report_generation_and_download() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let (status, _) = send(&app, get("/reports/download")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/reports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"top_n": 2}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let report = json(&body);
    assert_eq!(report["sections"], 2);
    assert_eq!(report["failed_narratives"], 0);
    assert_eq!(report["file_name"], "rapport_assurances_ia.docx");

    let response = app.clone().oneshot(get("/reports/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("rapport_assurances_ia.docx"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let (_, body) = send(&app, get("/")).await;
    assert!(String::from_utf8(body).unwrap().contains("Télécharger le rapport"));
}

#[tokio::test]
async fn test_form_post_redirects_and_zero_top_n_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let request = Request::builder()
        .method("POST")
        .uri("/reports")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/reports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"top_n": 0}"#))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn post_report(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/reports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_malformed_report_request_rejected_before_generation() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    for body in [r#"{"top_n": "abc"}"#, r#"{"top_n": -5}"#, "not json"] {
        let (status, response) = send(&app, post_report(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json(&response)["status"], 400);
    }

    // Nothing was generated
    let (status, _) = send(&app, get("/reports/download")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_report_request_uses_default_top_n() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = send(&app(&dir), post_report("")).await;

    assert_eq!(status, StatusCode::OK);
    let report = json(&body);
    assert_eq!(report["top_n"], 3);
    assert_eq!(report["sections"], 3);
}
