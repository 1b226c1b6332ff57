//! Random forest classifiers and evaluation helpers.

mod eval;
mod forest;

pub use eval::{accuracy, select_labels, select_rows, train_test_split};
pub use forest::{argmax, balanced_class_weights, ForestParams, RandomForest};
