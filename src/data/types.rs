//! Core dataset types

use ndarray::{Array1, Array2};

/// Dataset for machine learning
///
/// Feature matrix `x` paired with label vector `y`. The identifier and
/// label columns of the source table are never part of `x`.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub x: Array2<f64>,
    /// Label vector (n_samples), coerced to {0, 1}
    pub y: Array1<i64>,
    /// Feature column names, in matrix order
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Create a new dataset
    pub fn new(x: Array2<f64>, y: Array1<i64>, feature_names: Vec<String>) -> Self {
        assert_eq!(x.nrows(), y.len(), "X rows must match y length");
        assert_eq!(
            x.ncols(),
            feature_names.len(),
            "feature names must match X columns"
        );
        Self { x, y, feature_names }
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Number of features
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Rows labelled 0 and rows labelled 1
    pub fn label_counts(&self) -> (usize, usize) {
        let zeros = self.y.iter().filter(|&&v| v == 0).count();
        let ones = self.y.iter().filter(|&&v| v == 1).count();
        (zeros, ones)
    }

    /// Fraction of rows labelled 1
    pub fn class_balance(&self) -> f64 {
        if self.n_samples() == 0 {
            return 0.0;
        }
        let (_, ones) = self.label_counts();
        ones as f64 / self.n_samples() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_label_counts() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let y = array![0, 1, 0];
        let dataset = Dataset::new(x, y, vec!["f1".to_string(), "f2".to_string()]);

        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.label_counts(), (2, 1));
    }

    #[test]
    fn test_class_balance() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![1, 0, 1, 1];
        let dataset = Dataset::new(x, y, vec!["f1".to_string()]);

        assert_eq!(dataset.class_balance(), 0.75);
    }
}
