//! Random Forest - Bagged CART ensemble
//!
//! Fixed tree count and seed: same data + same config = same predictions.
//! Probability = mean leaf estimate across trees.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::tree::{DecisionTree, TreeParams};
use super::RiskClassifier;

// ============================================================================
// CONFIG
// ============================================================================

pub const DEFAULT_TREE_COUNT: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub seed: u64,
    /// None = floor(sqrt(n_features))
    pub max_features: Option<usize>,
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREE_COUNT,
            seed: DEFAULT_SEED,
            max_features: None,
            min_samples_split: 2,
            max_depth: None,
        }
    }
}

impl ForestConfig {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            n_trees,
            seed,
            ..Default::default()
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ForestError {
    #[error("cannot fit on an empty feature matrix")]
    Empty,

    #[error("feature matrix has {rows} rows but {labels} labels were given")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("forest needs at least one tree")]
    NoTrees,

    #[error("label at row {row} is {value}, expected 0 or 1")]
    NonBinaryLabel { row: usize, value: u8 },

    #[error("label column is constant ({0}); both classes are required")]
    ConstantLabel(u8),
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Fit on the full matrix. Each tree draws a bootstrap sample of
    /// size n with replacement from its own seeded generator.
    pub fn fit(x: ArrayView2<f64>, y: &[u8], config: &ForestConfig) -> Result<Self, ForestError> {
        validate_labels(x.nrows(), y)?;
        if x.ncols() == 0 {
            return Err(ForestError::Empty);
        }
        if config.n_trees == 0 {
            return Err(ForestError::NoTrees);
        }

        let n = x.nrows();
        let n_features = x.ncols();
        let params = TreeParams {
            max_features: config
                .max_features
                .unwrap_or_else(|| (n_features as f64).sqrt().floor() as usize)
                .clamp(1, n_features),
            min_samples_split: config.min_samples_split.max(2),
            max_depth: config.max_depth,
        };

        let mut master = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);
        let mut importances = vec![0.0; n_features];

        for _ in 0..config.n_trees {
            let mut rng = StdRng::seed_from_u64(master.gen());
            let samples: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

            let mut tree_importances = vec![0.0; n_features];
            trees.push(DecisionTree::fit(x, y, samples, &params, &mut rng, &mut tree_importances));

            let total: f64 = tree_importances.iter().sum();
            if total > 0.0 {
                for (acc, v) in importances.iter_mut().zip(&tree_importances) {
                    *acc += v / total;
                }
            }
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            importances.iter_mut().for_each(|v| *v /= total);
        }

        tracing::debug!(
            "Random forest fitted: {} trees, {} samples, {} features, max_features={}",
            trees.len(),
            n,
            n_features,
            params.max_features
        );

        Ok(Self {
            trees,
            importances,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean decrease in impurity per feature, summing to 1
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

impl RiskClassifier for RandomForest {
    fn predict_probability(&self, features: ArrayView1<f64>) -> f64 {
        let sum: f64 = self
            .trees
            .iter()
            .map(|t| t.predict_probability(features))
            .sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }
}

fn validate_labels(rows: usize, y: &[u8]) -> Result<(), ForestError> {
    if rows == 0 {
        return Err(ForestError::Empty);
    }
    if rows != y.len() {
        return Err(ForestError::LengthMismatch { rows, labels: y.len() });
    }
    if let Some((row, &value)) = y.iter().enumerate().find(|(_, &v)| v > 1) {
        return Err(ForestError::NonBinaryLabel { row, value });
    }
    if y.iter().all(|&v| v == y[0]) {
        return Err(ForestError::ConstantLabel(y[0]));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::DECISION_THRESHOLD;
    use ndarray::{array, Array2, Axis};

    fn separable() -> (Array2<f64>, Vec<u8>) {
        let x = array![
            [-1.2, 0.3],
            [-0.9, -0.4],
            [-1.1, 0.8],
            [-0.7, -0.1],
            [0.8, 0.2],
            [1.1, -0.6],
            [0.9, 0.5],
            [1.3, -0.2]
        ];
        (x, vec![0, 0, 0, 0, 1, 1, 1, 1])
    }

    #[test]
    fn test_probabilities_in_unit_interval_and_label_matches_threshold() {
        let (x, y) = separable();
        let forest = RandomForest::fit(x.view(), &y, &ForestConfig::new(25, 42)).unwrap();

        for row in x.axis_iter(Axis(0)) {
            let p = forest.predict_probability(row);
            assert!((0.0..=1.0).contains(&p));
            assert_eq!(forest.predict(row), u8::from(p >= DECISION_THRESHOLD));
        }
    }

    #[test]
    fn test_learns_separable_training_set() {
        let (x, y) = separable();
        let forest = RandomForest::fit(x.view(), &y, &ForestConfig::default()).unwrap();

        for (row, &label) in x.axis_iter(Axis(0)).zip(&y) {
            assert_eq!(forest.predict(row), label);
        }
        assert_eq!(forest.n_trees(), DEFAULT_TREE_COUNT);
    }

    #[test]
    fn test_same_seed_is_bit_identical() {
        let (x, y) = separable();
        let config = ForestConfig::new(30, 7);
        let a = RandomForest::fit(x.view(), &y, &config).unwrap();
        let b = RandomForest::fit(x.view(), &y, &config).unwrap();

        for row in x.axis_iter(Axis(0)) {
            assert_eq!(
                a.predict_probability(row).to_bits(),
                b.predict_probability(row).to_bits()
            );
        }
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn test_importances_favor_informative_feature() {
        let (x, y) = separable();
        let forest = RandomForest::fit(x.view(), &y, &ForestConfig::default()).unwrap();
        let imp = forest.feature_importances();

        assert_eq!(imp.len(), 2);
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(imp[0] > imp[1]);
    }

    #[test]
    fn test_label_validation() {
        let (x, _) = separable();
        let config = ForestConfig::default();

        assert_eq!(
            RandomForest::fit(x.view(), &[1; 8], &config).unwrap_err(),
            ForestError::ConstantLabel(1)
        );
        assert_eq!(
            RandomForest::fit(x.view(), &[0, 1, 2, 0, 1, 0, 1, 0], &config).unwrap_err(),
            ForestError::NonBinaryLabel { row: 2, value: 2 }
        );
        assert_eq!(
            RandomForest::fit(x.view(), &[0, 1], &config).unwrap_err(),
            ForestError::LengthMismatch { rows: 8, labels: 2 }
        );
    }

    #[test]
    fn test_rejects_empty_and_zero_trees() {
        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            RandomForest::fit(empty.view(), &[], &ForestConfig::default()).unwrap_err(),
            ForestError::Empty
        );

        let (x, y) = separable();
        assert_eq!(
            RandomForest::fit(x.view(), &y, &ForestConfig::new(0, 42)).unwrap_err(),
            ForestError::NoTrees
        );
    }
}
