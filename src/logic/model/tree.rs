//! Decision Tree - CART with Gini impurity
//!
//! Trained on a bootstrap sample (indices may repeat).
//! Leaves store the fraction of positive samples they received.

use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Tree growth parameters
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// Candidate features examined per split
    pub max_features: usize,
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        positive_fraction: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// Weighted child impurity (lower is better)
    impurity: f64,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    root: Node,
}

/// Training context shared through the recursion
struct Builder<'x, 'a> {
    x: ArrayView2<'x, f64>,
    y: &'a [u8],
    params: &'a TreeParams,
    rng: &'a mut StdRng,
    importances: &'a mut [f64],
}

impl DecisionTree {
    /// Grow a tree on `samples` (row indices into `x`).
    /// Impurity decreases are added to `importances` per feature.
    pub fn fit(
        x: ArrayView2<f64>,
        y: &[u8],
        samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut StdRng,
        importances: &mut [f64],
    ) -> Self {
        let mut builder = Builder {
            x,
            y,
            params,
            rng,
            importances,
        };
        let root = builder.grow(samples, 0);
        Self { root }
    }

    /// Positive fraction of the leaf reached by `row`
    pub fn predict_probability(&self, row: ArrayView1<f64>) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { positive_fraction } => return *positive_fraction,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }

}

impl Builder<'_, '_> {
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> Node {
        let n = samples.len();
        let positives = samples.iter().filter(|&&s| self.y[s] == 1).count();
        let positive_fraction = if n == 0 { 0.0 } else { positives as f64 / n as f64 };

        let pure = positives == 0 || positives == n;
        let too_small = n < self.params.min_samples_split;
        let too_deep = self.params.max_depth.is_some_and(|d| depth >= d);
        if pure || too_small || too_deep {
            return Node::Leaf { positive_fraction };
        }

        let Some(best) = self.best_split(&samples) else {
            return Node::Leaf { positive_fraction };
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&s| self.x[[s, best.feature]] <= best.threshold);
        if left.is_empty() || right.is_empty() {
            return Node::Leaf { positive_fraction };
        }

        let parent = n as f64 * gini(positives, n);
        self.importances[best.feature] += parent - n as f64 * best.impurity;

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(self.grow(left, depth + 1)),
            right: Box::new(self.grow(right, depth + 1)),
        }
    }

    /// Examine `max_features` random features; keep looking past that
    /// budget only while no valid split has been found.
    fn best_split(&mut self, samples: &[usize]) -> Option<SplitCandidate> {
        let mut features: Vec<usize> = (0..self.x.ncols()).collect();
        features.shuffle(&mut *self.rng);

        let mut best: Option<SplitCandidate> = None;
        for (visited, &feature) in features.iter().enumerate() {
            if visited >= self.params.max_features && best.is_some() {
                break;
            }
            if let Some(candidate) = self.best_split_on(feature, samples) {
                if best.map_or(true, |b| candidate.impurity < b.impurity) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    fn best_split_on(&self, feature: usize, samples: &[usize]) -> Option<SplitCandidate> {
        let mut points: Vec<(f64, u8)> = samples
            .iter()
            .map(|&s| (self.x[[s, feature]], self.y[s]))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let n = points.len();
        let total_pos = points.iter().filter(|p| p.1 == 1).count();

        let mut best: Option<SplitCandidate> = None;
        let mut left_pos = 0usize;
        for i in 0..n - 1 {
            if points[i].1 == 1 {
                left_pos += 1;
            }
            let (value, next) = (points[i].0, points[i + 1].0);
            if value == next {
                continue;
            }

            let left_n = i + 1;
            let right_n = n - left_n;
            let impurity = (left_n as f64 * gini(left_pos, left_n)
                + right_n as f64 * gini(total_pos - left_pos, right_n))
                / n as f64;

            if best.map_or(true, |b| impurity < b.impurity) {
                let mid = value + (next - value) / 2.0;
                // Midpoint can round up to `next` for adjacent floats
                let threshold = if mid < next { mid } else { value };
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
        best
    }
}

/// Gini impurity of a binary node
fn gini(positives: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64 / n as f64;
    2.0 * p * (1.0 - p)
}
