//! Report Assembler
//!
//! Top-N selection and section composition. Narratives are generated
//! one after another, before anything is serialized.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::logic::format::{format_amount, format_probability};
use crate::logic::narrative::{NarrativeGenerator, NarrativeOutcome};
use crate::logic::scoring::ScoredRecord;

pub const DEFAULT_TOP_N: usize = 10;

/// Label paragraph preceding each narrative
pub const NARRATIVE_LABEL: &str = "📝 Commentaire IA :";

// ============================================================================
// DOCUMENT MODEL
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub row_index: usize,
    /// Section heading
    pub company: String,
    pub risk_probability: f64,
    /// Indicator paragraphs, in display order
    pub paragraphs: Vec<String>,
    pub narrative: NarrativeOutcome,
}

impl ReportSection {
    /// Narrative paragraph text, placeholder included
    pub fn narrative_text(&self) -> String {
        self.narrative.clone().into_text()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    pub fn failed_narratives(&self) -> usize {
        self.sections.iter().filter(|s| s.narrative.is_failed()).count()
    }

    pub fn companies(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.company.clone()).collect()
    }
}

pub fn report_title(top_n: usize) -> String {
    format!("Rapport IA – Top {} compagnies à risque", top_n)
}

// ============================================================================
// SELECTION
// ============================================================================

/// The `top_n` riskiest records, probability descending.
/// Equal probabilities keep source row order.
pub fn select_top_n(records: &[ScoredRecord], top_n: usize) -> Vec<&ScoredRecord> {
    let mut ranked: Vec<&ScoredRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        b.risk_probability
            .total_cmp(&a.risk_probability)
            .then(a.row_index.cmp(&b.row_index))
    });
    ranked.truncate(top_n);
    ranked
}

// ============================================================================
// ASSEMBLY
// ============================================================================

fn section_for(record: &ScoredRecord, narrative: NarrativeOutcome) -> ReportSection {
    ReportSection {
        row_index: record.row_index,
        company: record.company.name.clone(),
        risk_probability: record.risk_probability,
        paragraphs: vec![
            format!(
                "Chiffre d'affaires : {} FCFA",
                format_amount(record.company.indicators.revenue)
            ),
            format!("Score IA : {}", format_probability(record.risk_probability)),
        ],
        narrative,
    }
}

/// Build the report for the `top_n` riskiest companies
pub async fn build_report(
    records: &[ScoredRecord],
    top_n: usize,
    narrator: &NarrativeGenerator,
) -> ReportDocument {
    let selected = select_top_n(records, top_n);
    tracing::info!("Generating report for {} companies", selected.len());

    let mut sections = Vec::with_capacity(selected.len());
    for record in selected {
        let narrative = narrator.generate(record).await;
        sections.push(section_for(record, narrative));
    }

    ReportDocument {
        title: report_title(sections.len()),
        generated_at: Utc::now(),
        sections,
    }
}
