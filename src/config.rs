//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::model::forest::{DEFAULT_SEED, DEFAULT_TREE_COUNT};
use crate::logic::model::ForestConfig;
use crate::logic::narrative::client::DEFAULT_BASE_URL;
use crate::logic::narrative::types::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::logic::narrative::NarrativeSettings;
use crate::logic::report::DEFAULT_TOP_N;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Input workbook
    pub dataset_path: PathBuf,

    /// Server port
    pub port: u16,

    /// Text-generation API key (secret)
    pub openai_api_key: Option<String>,

    /// Text-generation base URL
    pub openai_base_url: String,

    pub narrative_model: String,
    pub narrative_temperature: f32,
    pub narrative_max_tokens: u32,

    pub forest_trees: usize,
    pub forest_seed: u64,

    /// Default number of companies in the report
    pub report_top_n: usize,

    /// Output document path
    pub report_path: PathBuf,

    /// Environment (development, production)
    pub environment: String,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            dataset_path: env::var("DATASET_PATH")
                .unwrap_or_else(|_| "donnees_assurances_simulees.xlsx".to_string())
                .into(),

            port: parsed("PORT", 8080),

            openai_api_key: env::var("OPENAI_API_KEY").ok(),

            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),

            narrative_model: env::var("NARRATIVE_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),

            narrative_temperature: parsed("NARRATIVE_TEMPERATURE", DEFAULT_TEMPERATURE),

            narrative_max_tokens: parsed("NARRATIVE_MAX_TOKENS", DEFAULT_MAX_TOKENS),

            forest_trees: parsed("FOREST_TREES", DEFAULT_TREE_COUNT),

            forest_seed: parsed("FOREST_SEED", DEFAULT_SEED),

            report_top_n: parsed("REPORT_TOP_N", DEFAULT_TOP_N).max(1),

            report_path: env::var("REPORT_PATH")
                .unwrap_or_else(|_| "rapport_assurances_ia.docx".to_string())
                .into(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn forest(&self) -> ForestConfig {
        ForestConfig::new(self.forest_trees, self.forest_seed)
    }

    pub fn narrative(&self) -> NarrativeSettings {
        NarrativeSettings {
            model: self.narrative_model.clone(),
            temperature: self.narrative_temperature,
            max_tokens: self.narrative_max_tokens,
        }
    }
}
