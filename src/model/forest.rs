//! Bagged ensemble of `linfa-trees` decision trees. Bootstrap draws come
//! from one RNG seeded with `ForestParams::seed` and tree induction is
//! deterministic, so two fits on the same data produce the same forest.

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    /// Weight each class by `n / (k * count)` to offset imbalance
    pub balanced_class_weight: bool,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            balanced_class_weight: false,
            bootstrap: true,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<DecisionTree<f64, usize>>,
    n_features: usize,
    n_classes: usize,
}

/// `n / (k * count_c)` for each class present, zero for absent classes
pub fn balanced_class_weights(y: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0usize; n_classes];
    for &label in y {
        counts[label] += 1;
    }
    let present = counts.iter().filter(|&&c| c > 0).count().max(1);
    counts
        .iter()
        .map(|&c| {
            if c == 0 {
                0.0
            } else {
                y.len() as f64 / (present as f64 * c as f64)
            }
        })
        .collect()
}

/// Index of the largest entry; ties resolve to the lower index
pub fn argmax(proba: ArrayView1<f64>) -> usize {
    let mut best = 0;
    for (c, &p) in proba.iter().enumerate() {
        if p > proba[best] {
            best = c;
        }
    }
    best
}

/// Per-sample weights scaled so the lightest present class weighs 1.
/// linfa's `min_weight_split` / `min_weight_leaf` are in weight units.
fn sample_weights(y: &[usize], class_weight: &[f64]) -> Vec<f32> {
    let floor = class_weight
        .iter()
        .copied()
        .filter(|w| *w > 0.0)
        .fold(f64::INFINITY, f64::min);
    y.iter().map(|&c| (class_weight[c] / floor) as f32).collect()
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
            n_features: 0,
            n_classes: 0,
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Name reported alongside predictions
    pub fn model_type(&self) -> &'static str {
        "RandomForestClassifier"
    }

    /// Fit on rows of `x` with class labels `y` in `0..k`.
    pub fn fit(&mut self, x: ArrayView2<f64>, y: &[usize]) -> Result<()> {
        if x.nrows() == 0 || y.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if x.nrows() != y.len() {
            return Err(Error::DimensionMismatch {
                expected: x.nrows(),
                actual: y.len(),
            });
        }

        let n = y.len();
        let n_classes = y.iter().copied().max().unwrap_or(0).max(1) + 1;
        let class_weight = if self.params.balanced_class_weight {
            balanced_class_weights(y, n_classes)
        } else {
            vec![1.0; n_classes]
        };
        let weights = sample_weights(y, &class_weight);

        let tree_params = DecisionTree::<f64, usize>::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(self.params.max_depth)
            .min_weight_split(2.0)
            .min_weight_leaf(1.0);

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut trees = Vec::with_capacity(self.params.n_estimators);
        for _ in 0..self.params.n_estimators.max(1) {
            let rows: Vec<usize> = if self.params.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            let records = x.select(Axis(0), &rows);
            let targets: Array1<usize> = rows.iter().map(|&i| y[i]).collect();
            let bag_weights: Array1<f32> = rows.iter().map(|&i| weights[i]).collect();
            let bag = DatasetBase::new(records, targets).with_weights(bag_weights);
            trees.push(tree_params.fit(&bag)?);
        }

        debug!(trees = trees.len(), samples = n, features = x.ncols(), classes = n_classes, "forest fitted");
        self.trees = trees;
        self.n_features = x.ncols();
        self.n_classes = n_classes;
        Ok(())
    }

    fn check_dim(&self, len: usize) -> Result<()> {
        if !self.is_fitted() {
            return Err(Error::NotFitted("RandomForest"));
        }
        if len != self.n_features {
            return Err(Error::DimensionMismatch {
                expected: self.n_features,
                actual: len,
            });
        }
        Ok(())
    }

    /// Share of trees voting for each class, one row per input row
    pub fn predict_proba_batch(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        self.check_dim(x.ncols())?;
        let mut votes = Array2::<f64>::zeros((x.nrows(), self.n_classes));
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(&x);
            for (row, &class) in predicted.iter().enumerate() {
                votes[[row, class]] += 1.0;
            }
        }
        votes /= self.trees.len() as f64;
        Ok(votes)
    }

    pub fn predict_proba(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_proba_batch(x.insert_axis(Axis(0)))?;
        Ok(proba.index_axis_move(Axis(0), 0))
    }

    /// Most voted class; ties resolve to the lower label
    pub fn predict(&self, x: ArrayView1<f64>) -> Result<usize> {
        Ok(argmax(self.predict_proba(x)?.view()))
    }

    pub fn predict_batch(&self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        let proba = self.predict_proba_batch(x)?;
        Ok(proba.rows().into_iter().map(argmax).collect())
    }
}
