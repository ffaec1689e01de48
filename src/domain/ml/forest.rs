//! Bagged decision-tree ensemble.
//!
//! Each member is a smartcore `DecisionTreeClassifier` fitted on a bootstrap
//! sample of the training rows, drawn with a seeded RNG so the same rows and
//! seed always produce the same forest. Class probabilities are vote fractions.
//!
//! A bootstrap sample can contain a single class. smartcore refuses to fit a
//! tree on one class, so such members are stored as a constant vote.

use crate::domain::errors::PipelineError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters,
};
use std::collections::BTreeSet;
use std::fmt;

type Tree = DecisionTreeClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Hyper-parameters of the ensemble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParameters {
    pub n_trees: usize,
    pub seed: u64,
    pub max_depth: Option<u16>,
    pub min_samples_split: usize,
}

impl Default for ForestParameters {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[derive(Serialize, Deserialize)]
enum Member {
    Constant(u32),
    Tree(Tree),
}

/// Predicted class together with the full vote distribution
#[derive(Debug, Clone, PartialEq)]
pub struct ClassVotes {
    pub class: u32,
    /// `(class, probability)` pairs in ascending class order
    pub distribution: Vec<(u32, f64)>,
}

impl ClassVotes {
    pub fn confidence(&self) -> f64 {
        self.distribution
            .iter()
            .map(|(_, p)| *p)
            .fold(0.0, f64::max)
    }
}

#[derive(Serialize, Deserialize)]
pub struct TenantForest {
    n_features: usize,
    classes: Vec<u32>,
    members: Vec<Member>,
}

impl fmt::Debug for TenantForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantForest")
            .field("n_features", &self.n_features)
            .field("classes", &self.classes)
            .field("n_trees", &self.members.len())
            .finish()
    }
}

impl TenantForest {
    pub fn fit(x: &[Vec<f64>], y: &[u32], params: ForestParameters) -> Result<Self, PipelineError> {
        if x.is_empty() || x.len() != y.len() {
            return Err(PipelineError::training_data(format!(
                "cannot fit forest on {} rows with {} labels",
                x.len(),
                y.len()
            )));
        }
        if params.n_trees == 0 {
            return Err(PipelineError::training_data("forest needs at least one tree"));
        }

        let n_features = x[0].len();
        let classes: Vec<u32> = y.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        let mut tree_params =
            DecisionTreeClassifierParameters::default().with_min_samples_split(params.min_samples_split);
        if let Some(depth) = params.max_depth {
            tree_params = tree_params.with_max_depth(depth);
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let n = x.len();
        let mut members = Vec::with_capacity(params.n_trees);

        for _ in 0..params.n_trees {
            let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
            let y_boot: Vec<u32> = sample.iter().map(|&i| y[i]).collect();

            let first = y_boot[0];
            if y_boot.iter().all(|&c| c == first) {
                members.push(Member::Constant(first));
                continue;
            }

            let x_boot: Vec<Vec<f64>> = sample.iter().map(|&i| x[i].clone()).collect();
            let x_matrix = DenseMatrix::from_2d_vec(&x_boot)
                .map_err(|e| PipelineError::training_data(format!("Matrix error: {}", e)))?;
            let tree = Tree::fit(&x_matrix, &y_boot, tree_params.clone())
                .map_err(|e| PipelineError::training_data(format!("Training error: {}", e)))?;
            members.push(Member::Tree(tree));
        }

        Ok(Self {
            n_features,
            classes,
            members,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.members.len()
    }

    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    /// Votes for each row of `x`.
    pub fn predict_votes(&self, x: &[Vec<f64>]) -> Result<Vec<ClassVotes>, PipelineError> {
        if x.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(row) = x.iter().find(|r| r.len() != self.n_features) {
            return Err(PipelineError::invalid_input(format!(
                "model expects {} features, got {}",
                self.n_features,
                row.len()
            )));
        }
        if self.members.is_empty() || self.classes.is_empty() {
            return Err(PipelineError::artifact_corruption("model has no trees"));
        }

        let x_matrix = DenseMatrix::from_2d_vec(&x.to_vec())
            .map_err(|e| PipelineError::invalid_input(format!("Matrix error: {}", e)))?;

        // counts[row][class_index]
        let mut counts = vec![vec![0usize; self.classes.len()]; x.len()];
        for member in &self.members {
            let predicted: Vec<u32> = match member {
                Member::Constant(class) => vec![*class; x.len()],
                Member::Tree(tree) => tree.predict(&x_matrix).map_err(|e| {
                    PipelineError::artifact_corruption(format!("Prediction failed: {}", e))
                })?,
            };
            for (row_counts, class) in counts.iter_mut().zip(predicted) {
                let idx = self.class_index(class)?;
                row_counts[idx] += 1;
            }
        }

        let total = self.members.len() as f64;
        Ok(counts
            .into_iter()
            .map(|row_counts| {
                // Ties resolve to the lowest class
                let mut best = 0;
                for (idx, count) in row_counts.iter().enumerate() {
                    if *count > row_counts[best] {
                        best = idx;
                    }
                }
                ClassVotes {
                    class: self.classes[best],
                    distribution: self
                        .classes
                        .iter()
                        .zip(row_counts.iter())
                        .map(|(c, n)| (*c, *n as f64 / total))
                        .collect(),
                }
            })
            .collect())
    }

    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<u32>, PipelineError> {
        Ok(self.predict_votes(x)?.into_iter().map(|v| v.class).collect())
    }

    fn class_index(&self, class: u32) -> Result<usize, PipelineError> {
        self.classes.iter().position(|c| *c == class).ok_or_else(|| {
            PipelineError::artifact_corruption(format!("tree voted for unknown class {}", class))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold_data() -> (Vec<Vec<f64>>, Vec<u32>) {
        let x: Vec<Vec<f64>> = (0..60).map(|i| vec![i as f64, (i % 7) as f64]).collect();
        let y: Vec<u32> = (0..60).map(|i| u32::from(i >= 30)).collect();
        (x, y)
    }

    #[test]
    fn test_learns_threshold() {
        let (x, y) = threshold_data();
        let forest = TenantForest::fit(&x, &y, ForestParameters::default()).unwrap();

        assert_eq!(forest.n_trees(), 100);
        assert_eq!(forest.classes(), &[0, 1]);
        let predicted = forest.predict(&[vec![5.0, 1.0], vec![55.0, 2.0]]).unwrap();
        assert_eq!(predicted, vec![0, 1]);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let (x, y) = threshold_data();
        let forest = TenantForest::fit(&x, &y, ForestParameters::default()).unwrap();

        for votes in forest.predict_votes(&x).unwrap() {
            let total: f64 = votes.distribution.iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-9);
            assert!(votes.confidence() >= 0.5 && votes.confidence() <= 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = threshold_data();
        let params = ForestParameters {
            n_trees: 15,
            ..Default::default()
        };
        let a = TenantForest::fit(&x, &y, params).unwrap();
        let b = TenantForest::fit(&x, &y, params).unwrap();

        let probe: Vec<Vec<f64>> = (0..60).map(|i| vec![i as f64 + 0.5, 3.0]).collect();
        assert_eq!(a.predict_votes(&probe).unwrap(), b.predict_votes(&probe).unwrap());
    }

    #[test]
    fn test_rejects_wrong_width() {
        let (x, y) = threshold_data();
        let forest = TenantForest::fit(
            &x,
            &y,
            ForestParameters {
                n_trees: 3,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(forest.predict(&[vec![1.0]]).is_err());
    }

    #[test]
    fn test_serde_keeps_votes() {
        let (x, y) = threshold_data();
        let forest = TenantForest::fit(
            &x,
            &y,
            ForestParameters {
                n_trees: 10,
                ..Default::default()
            },
        )
        .unwrap();

        let json = serde_json::to_string(&forest).unwrap();
        let restored: TenantForest = serde_json::from_str(&json).unwrap();
        assert_eq!(
            forest.predict_votes(&x).unwrap(),
            restored.predict_votes(&x).unwrap()
        );
    }
}
