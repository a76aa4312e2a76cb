//! Explain Module - Indicator importance

pub mod engine;
pub mod types;

pub use engine::rank_importances;
pub use types::FeatureContribution;
