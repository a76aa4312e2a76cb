//! Scoring Pass
//!
//! Scale → fit → predict over the whole portfolio in one pass.
//! Training and inference use the same rows, so the accuracy reported
//! here is an in-sample (optimistic) figure.

use ndarray::Axis;
use serde::Serialize;
use thiserror::Error;

use super::dataset::CompanyRecord;
use super::explain::{rank_importances, FeatureContribution};
use super::features::{feature_matrix, ScalerError, StandardScaler};
use super::model::{ForestConfig, ForestError, RandomForest, RiskClassifier};

/// Note attached to every accuracy figure shown to a consumer
pub const IN_SAMPLE_NOTE: &str =
    "Exactitude mesurée sur les données d'entraînement (pas d'échantillon de test) : estimation optimiste";

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("feature preparation failed: {0}")]
    Features(#[from] ScalerError),

    #[error("model fitting failed: {0}")]
    Model(#[from] ForestError),
}

/// A company with its predicted label and probability. Never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    /// Position in the source table
    pub row_index: usize,
    pub company: CompanyRecord,
    pub predicted_label: u8,
    pub risk_probability: f64,
}

impl ScoredRecord {
    pub fn is_flagged(&self) -> bool {
        self.predicted_label == 1
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub n_trees: usize,
    pub seed: u64,
    pub samples: usize,
    pub flagged: usize,
    pub in_sample_accuracy: f64,
    pub accuracy_note: &'static str,
    pub importances: Vec<FeatureContribution>,
}

/// Scored table plus the fitted preprocessing, owned by the session
#[derive(Debug, Clone)]
pub struct ScoredPortfolio {
    records: Vec<ScoredRecord>,
    scaler: StandardScaler,
    summary: ModelSummary,
}

impl ScoredPortfolio {
    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ScoredRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn summary(&self) -> &ModelSummary {
        &self.summary
    }
}

/// Fit the forest on every record and score the same records
pub fn score_portfolio(
    companies: Vec<CompanyRecord>,
    config: &ForestConfig,
) -> Result<ScoredPortfolio, ScoringError> {
    let raw = feature_matrix(&companies);
    let (scaler, scaled) = StandardScaler::fit_transform(raw.view())?;
    let labels: Vec<u8> = companies.iter().map(CompanyRecord::label).collect();

    let forest = RandomForest::fit(scaled.view(), &labels, config)?;

    let records: Vec<ScoredRecord> = companies
        .into_iter()
        .zip(scaled.axis_iter(Axis(0)))
        .enumerate()
        .map(|(row_index, (company, features))| ScoredRecord {
            row_index,
            company,
            predicted_label: forest.predict(features),
            risk_probability: forest.predict_probability(features),
        })
        .collect();

    let correct = records
        .iter()
        .filter(|r| r.predicted_label == r.company.label())
        .count();
    let flagged = records.iter().filter(|r| r.is_flagged()).count();

    let summary = ModelSummary {
        n_trees: forest.n_trees(),
        seed: config.seed,
        samples: records.len(),
        flagged,
        in_sample_accuracy: correct as f64 / records.len() as f64,
        accuracy_note: IN_SAMPLE_NOTE,
        importances: rank_importances(forest.feature_importances()).contributions,
    };

    tracing::info!(
        "Scored {} companies: {} flagged at risk, in-sample accuracy {:.2} (optimistic)",
        summary.samples,
        summary.flagged,
        summary.in_sample_accuracy
    );

    Ok(ScoredPortfolio {
        records,
        scaler,
        summary,
    })
}
