//! Features Module - Feature Preparation
//!
//! Drops identity/label columns and standardizes the six indicators.

pub mod scaler;

pub use scaler::{feature_matrix, ScalerError, StandardScaler};
