//! Model Module - Risk Classifier
//!
//! Random forest trained once per process on the scaled portfolio.
//! The trait keeps the scoring pass independent of the ensemble itself.

pub mod tree;
pub mod forest;

use ndarray::ArrayView1;

pub use forest::{ForestConfig, ForestError, RandomForest};

/// Vote fraction at or above which a company is flagged at risk
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Trait for binary risk classifiers over a standardized feature row
pub trait RiskClassifier {
    /// Estimated probability of the positive (at-risk) class, in [0, 1]
    fn predict_probability(&self, features: ArrayView1<f64>) -> f64;

    /// 1 iff the probability reaches DECISION_THRESHOLD
    fn predict(&self, features: ArrayView1<f64>) -> u8 {
        u8::from(self.predict_probability(features) >= DECISION_THRESHOLD)
    }
}
