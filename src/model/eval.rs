//! Held-out evaluation: seeded shuffle split and accuracy.

use ndarray::{Array2, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle `0..n` and hold out `ceil(n * test_size)` indices.
/// Returns `(train, test)`; the training side keeps at least one row.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut idx: Vec<usize> = (0..n).collect();
    idx.shuffle(&mut StdRng::seed_from_u64(seed));
    let n_test = ((n as f64) * test_size.clamp(0.0, 1.0)).ceil() as usize;
    let n_test = n_test.min(n.saturating_sub(1));
    let train = idx.split_off(n_test);
    (train, idx)
}

pub fn select_rows(x: ArrayView2<f64>, rows: &[usize]) -> Array2<f64> {
    x.select(Axis(0), rows)
}

pub fn select_labels(y: &[usize], rows: &[usize]) -> Vec<usize> {
    rows.iter().map(|&i| y[i]).collect()
}

/// Fraction of positions where the labels agree; 0.0 for empty input
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let hits = y_true.iter().zip(y_pred).filter(|(a, b)| a == b).count();
    hits as f64 / y_true.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn split_sizes_and_disjointness() {
        let (train, test) = train_test_split(100, 0.3, 42);
        assert_eq!(test.len(), 30);
        assert_eq!(train.len(), 70);
        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_seeded() {
        assert_eq!(train_test_split(20, 0.3, 42), train_test_split(20, 0.3, 42));
        assert_ne!(train_test_split(20, 0.3, 42), train_test_split(20, 0.3, 43));
    }

    #[test]
    fn split_rounds_up_and_keeps_a_training_row() {
        assert_eq!(train_test_split(10, 0.25, 1).1.len(), 3);
        assert_eq!(train_test_split(1, 0.5, 1).0.len(), 1);
    }

    #[test]
    fn accuracy_counts_matches() {
        assert_eq!(accuracy(&[1, 0, 1, 1], &[1, 1, 1, 0]), 0.5);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn row_selection() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        assert_eq!(select_rows(x.view(), &[2, 0]), array![[5.0, 6.0], [1.0, 2.0]]);
        assert_eq!(select_labels(&[7, 8, 9], &[2, 0]), vec![9, 7]);
    }
}
