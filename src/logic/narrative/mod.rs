//! Narrative Module - AI Commentary per Company
//!
//! prompt → external text generation → `NarrativeOutcome`.
//! A failed call becomes `Failed { reason }`; it never aborts a batch.

pub mod types;
pub mod prompt;
pub mod client;

use std::sync::Arc;

pub use client::{OpenAiClient, TextGenerator};
pub use prompt::build_prompt;
pub use types::{
    CompletionRequest, NarrativeError, NarrativeOutcome, NarrativeSettings, NARRATIVE_ERROR_MARKER,
};

use crate::logic::scoring::ScoredRecord;

/// Generates one commentary per scored company
#[derive(Clone)]
pub struct NarrativeGenerator {
    backend: Arc<dyn TextGenerator>,
    settings: NarrativeSettings,
}

impl NarrativeGenerator {
    pub fn new(backend: Arc<dyn TextGenerator>, settings: NarrativeSettings) -> Self {
        Self { backend, settings }
    }

    /// Generate fresh commentary for `record`. Never cached.
    pub async fn generate(&self, record: &ScoredRecord) -> NarrativeOutcome {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            prompt: build_prompt(record),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let outcome = NarrativeOutcome::from(self.backend.complete(&request).await);
        match &outcome {
            NarrativeOutcome::Generated { text } => {
                tracing::debug!("Narrative generated for {} ({} chars)", record.company.name, text.len());
            }
            NarrativeOutcome::Failed { reason } => {
                tracing::warn!("Narrative failed for {}: {}", record.company.name, reason);
            }
        }
        outcome
    }
}
