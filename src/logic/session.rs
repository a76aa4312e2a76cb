//! Session - Application State for one process run
//!
//! [dataset loaded] → [model fit] → [serving] → (report on demand).
//! Built once at startup, read-only afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;

use super::dataset::{load_companies, CompanyRecord, DatasetError};
use super::model::ForestConfig;
use super::narrative::{NarrativeGenerator, OpenAiClient};
use super::report::{build_report, write_docx, ReportError};
use super::scoring::{score_portfolio, ScoredPortfolio, ScoringError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Where and how large the report is
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub top_n: usize,
    pub output_path: PathBuf,
}

/// Descriptor of the last written report
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub id: Uuid,
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub top_n: usize,
    pub sections: usize,
    pub failed_narratives: usize,
    pub companies: Vec<String>,
}

pub struct Session {
    portfolio: ScoredPortfolio,
    narrator: NarrativeGenerator,
    report: ReportSettings,
}

impl Session {
    /// Load, prepare, fit and score. Any failure is fatal.
    pub fn bootstrap(config: &Config) -> Result<Self, SessionError> {
        let companies = load_companies(&config.dataset_path)?;

        let client = OpenAiClient::new(&config.openai_base_url, config.openai_api_key.clone());
        let narrator = NarrativeGenerator::new(Arc::new(client), config.narrative());

        Self::from_records(
            companies,
            &config.forest(),
            narrator,
            ReportSettings {
                top_n: config.report_top_n,
                output_path: config.report_path.clone(),
            },
        )
    }

    pub fn from_records(
        companies: Vec<CompanyRecord>,
        forest: &ForestConfig,
        narrator: NarrativeGenerator,
        report: ReportSettings,
    ) -> Result<Self, SessionError> {
        let portfolio = score_portfolio(companies, forest)?;
        Ok(Self {
            portfolio,
            narrator,
            report,
        })
    }

    pub fn portfolio(&self) -> &ScoredPortfolio {
        &self.portfolio
    }

    pub fn report_settings(&self) -> &ReportSettings {
        &self.report
    }

    /// Generate narratives for the `top_n` riskiest companies and write
    /// the document. Nothing is reused from earlier generations.
    pub async fn generate_report(&self, top_n: usize) -> Result<GeneratedReport, ReportError> {
        let document = build_report(self.portfolio.records(), top_n, &self.narrator).await;

        let path = self.report.output_path.clone();
        let write_path = path.clone();
        let written = document.clone();
        tokio::task::spawn_blocking(move || write_docx(&written, &write_path))
            .await
            .map_err(|e| ReportError::Serialize(e.to_string()))??;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rapport.docx".to_string());

        Ok(GeneratedReport {
            id: Uuid::new_v4(),
            file_name,
            path,
            generated_at: document.generated_at,
            top_n,
            sections: document.sections.len(),
            failed_narratives: document.failed_narratives(),
            companies: document.companies(),
        })
    }
}
