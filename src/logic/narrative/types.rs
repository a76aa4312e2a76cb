//! Narrative Types

use serde::Serialize;
use thiserror::Error;

/// Prefix of the placeholder text substituted for a failed narrative
pub const NARRATIVE_ERROR_MARKER: &str = "Erreur OpenAI";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Sampling parameters sent with every request
#[derive(Debug, Clone)]
pub struct NarrativeSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// One call to the text-generation service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Any failure of the external call. Callers never see it past
/// the generator: it is folded into `NarrativeOutcome::Failed`.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("empty response")]
    Empty,
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        NarrativeError::Transport(err.to_string())
    }
}

/// Result of generating one company's commentary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NarrativeOutcome {
    Generated { text: String },
    Failed { reason: String },
}

impl NarrativeOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, NarrativeOutcome::Failed { .. })
    }

    /// Text for the report: the narrative, or a visible placeholder
    pub fn into_text(self) -> String {
        match self {
            NarrativeOutcome::Generated { text } => text,
            NarrativeOutcome::Failed { reason } => format!("{} : {}", NARRATIVE_ERROR_MARKER, reason),
        }
    }
}

impl From<Result<String, NarrativeError>> for NarrativeOutcome {
    fn from(result: Result<String, NarrativeError>) -> Self {
        match result {
            Ok(text) => NarrativeOutcome::Generated { text },
            Err(e) => NarrativeOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}
