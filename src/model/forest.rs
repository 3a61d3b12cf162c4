//! Regression tree ensembles (random forests and boosted trees).
//!
//! Trees are stored as flat node arrays with the root at index 0. A split
//! sends a sample left when `x[feature] <= threshold`, matching the
//! exporters these artifacts come from.

use crate::error::{EstimatorError, Result};
use crate::model::Predictor;
use crate::preprocessing::FeatureVector;
use crate::schema::FEATURE_COUNT;
use serde::{Deserialize, Serialize};

/// A node in a regression tree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split node.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Leaf with its output value.
    Leaf { value: f64 },
}

/// One regression tree, as stored in a model artifact.
///
/// Trees are evaluated only through a [`TreeEnsemble`], which validates them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Check that the node array forms a finite tree over the feature vector.
    ///
    /// Children must point strictly forward, which rules out cycles and lets
    /// [`RegressionTree::predict`] terminate after at most `nodes.len()` steps.
    fn validate(&self, tree_idx: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(EstimatorError::InvalidArtifact(format!(
                "tree {} has no nodes",
                tree_idx
            )));
        }
        let invalid = |node_idx: usize, what: String| {
            EstimatorError::InvalidArtifact(format!("tree {} node {}: {}", tree_idx, node_idx, what))
        };

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(EstimatorError::FeatureMismatch {
                            expected_features: FEATURE_COUNT,
                            got_features: feature.saturating_add(1),
                        });
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(idx, "threshold is not finite".to_string()));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(idx, format!("child {} out of order", child)));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(idx, "leaf value is not finite".to_string()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Only sound after [`RegressionTree::validate`].
    pub(crate) fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// How per-tree outputs are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of all trees (random forest).
    #[default]
    Mean,
    /// Base score plus the sum of all trees (gradient boosting).
    Sum,
}

/// Serializable parameters for a [`TreeEnsemble`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleParams {
    #[serde(default)]
    pub aggregation: Aggregation,
    /// Added to the summed output. Ignored for [`Aggregation::Mean`].
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

/// A validated ensemble of regression trees.
#[derive(Clone, Debug)]
pub struct TreeEnsemble {
    trees: Vec<RegressionTree>,
    aggregation: Aggregation,
    base_score: f64,
}

impl TreeEnsemble {
    pub fn from_params(params: TreeEnsembleParams) -> Result<Self> {
        if params.trees.is_empty() {
            return Err(EstimatorError::InvalidArtifact(
                "tree ensemble has no trees".to_string(),
            ));
        }
        if !params.base_score.is_finite() {
            return Err(EstimatorError::InvalidArtifact(
                "base score is not finite".to_string(),
            ));
        }
        for (idx, tree) in params.trees.iter().enumerate() {
            tree.validate(idx)?;
        }

        Ok(TreeEnsemble {
            trees: params.trees,
            aggregation: params.aggregation,
            base_score: params.base_score,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn extract_params(&self) -> TreeEnsembleParams {
        TreeEnsembleParams {
            aggregation: self.aggregation,
            base_score: self.base_score,
            trees: self.trees.clone(),
        }
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        let y = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + total,
        };
        if y.is_finite() {
            Ok(y)
        } else {
            Err(EstimatorError::Predictor(format!(
                "tree ensemble produced {}",
                y
            )))
        }
    }

    fn name(&self) -> &'static str {
        match self.aggregation {
            Aggregation::Mean => "random_forest",
            Aggregation::Sum => "boosted_trees",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::RegressionModel;
    use crate::schema::Field;
    use crate::serialization::Artifact;
    use approx::assert_relative_eq;

    /// area <= 3000 ? (airconditioning <= 0.5 ? 100 : 150) : 300
    fn stump_tree() -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: Field::Area.position(),
                    threshold: 3000.0,
                    left: 1,
                    right: 4,
                },
                TreeNode::Split {
                    feature: Field::Airconditioning.position(),
                    threshold: 0.5,
                    left: 2,
                    right: 3,
                },
                TreeNode::Leaf { value: 100.0 },
                TreeNode::Leaf { value: 150.0 },
                TreeNode::Leaf { value: 300.0 },
            ],
        }
    }

    fn constant_tree(value: f64) -> RegressionTree {
        RegressionTree {
            nodes: vec![TreeNode::Leaf { value }],
        }
    }

    fn features(area: f64, airconditioning: f64) -> FeatureVector {
        let mut x = [0.0; FEATURE_COUNT];
        x[Field::Area.position()] = area;
        x[Field::Airconditioning.position()] = airconditioning;
        FeatureVector::from_ordered(x)
    }

    #[test]
    fn test_split_threshold_is_inclusive_on_the_left() {
        let tree = stump_tree();
        assert_eq!(tree.predict(&features(3000.0, 0.0)), 100.0);
        assert_eq!(tree.predict(&features(3000.0, 1.0)), 150.0);
        assert_eq!(tree.predict(&features(3000.5, 0.0)), 300.0);
    }

    #[test]
    fn test_mean_aggregation_averages_trees() {
        let forest = TreeEnsemble::from_params(TreeEnsembleParams {
            aggregation: Aggregation::Mean,
            base_score: 999.0,
            trees: vec![stump_tree(), constant_tree(200.0)],
        })
        .unwrap();
        let y = forest.predict(&features(2500.0, 1.0)).unwrap();
        assert_relative_eq!(y, (150.0 + 200.0) / 2.0);
        assert_eq!(forest.name(), "random_forest");
        assert_eq!(forest.n_trees(), 2);
    }

    #[test]
    fn test_sum_aggregation_adds_base_score() {
        let boosted = TreeEnsemble::from_params(TreeEnsembleParams {
            aggregation: Aggregation::Sum,
            base_score: 10.0,
            trees: vec![stump_tree(), constant_tree(-5.0)],
        })
        .unwrap();
        let y = boosted.predict(&features(4000.0, 0.0)).unwrap();
        assert_relative_eq!(y, 10.0 + 300.0 - 5.0);
        assert_eq!(boosted.aggregation(), Aggregation::Sum);
    }

    #[test]
    fn test_empty_ensemble_is_rejected() {
        let result = TreeEnsemble::from_params(TreeEnsembleParams {
            aggregation: Aggregation::Mean,
            base_score: 0.0,
            trees: vec![],
        });
        assert!(matches!(result, Err(EstimatorError::InvalidArtifact(_))));
    }

    #[test]
    fn test_backward_child_is_rejected() {
        let cyclic = RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 0,
                },
                TreeNode::Leaf { value: 1.0 },
            ],
        };
        let result = TreeEnsemble::from_params(TreeEnsembleParams {
            aggregation: Aggregation::Mean,
            base_score: 0.0,
            trees: vec![cyclic],
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_dangling_child_is_rejected() {
        let dangling = RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 1,
                    right: 7,
                },
                TreeNode::Leaf { value: 1.0 },
            ],
        };
        assert!(dangling.validate(0).is_err());
    }

    #[test]
    fn test_out_of_range_feature_is_feature_mismatch() {
        let tree = RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: FEATURE_COUNT,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: 2.0 },
            ],
        };
        assert!(matches!(
            tree.validate(0),
            Err(EstimatorError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_self_referencing_children_are_rejected() {
        let looping = RegressionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 5,
                right: 5,
            }],
        };
        let result = TreeEnsemble::from_params(TreeEnsembleParams {
            aggregation: Aggregation::Sum,
            base_score: 0.0,
            trees: vec![looping],
        });
        assert!(matches!(result, Err(EstimatorError::InvalidArtifact(_))));
    }

    #[test]
    fn test_huge_feature_index_fails_to_load() {
        let json = format!(
            r#"{{"tree_ensemble": {{"trees": [{{"nodes": [
                {{"split": {{"feature": {}, "threshold": 1.0, "left": 1, "right": 2}}}},
                {{"leaf": {{"value": 1.0}}}},
                {{"leaf": {{"value": 2.0}}}}
            ]}}]}}}}"#,
            usize::MAX
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("house_price_model.json");
        std::fs::write(&path, json).unwrap();

        let err = RegressionModel::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactLoad);
        match err {
            EstimatorError::ArtifactLoad { source, .. } => assert!(matches!(
                *source,
                EstimatorError::FeatureMismatch {
                    expected_features: FEATURE_COUNT,
                    got_features: usize::MAX,
                }
            )),
            other => panic!("expected ArtifactLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_leaf_is_rejected() {
        assert!(constant_tree(f64::NAN).validate(0).is_err());
        assert!(RegressionTree { nodes: vec![] }.validate(0).is_err());
    }

    #[test]
    fn test_json_layout() {
        let json = r#"{
            "aggregation": "mean",
            "trees": [
                {"nodes": [
                    {"split": {"feature": 0, "threshold": 3000.0, "left": 1, "right": 2}},
                    {"leaf": {"value": 1.0}},
                    {"leaf": {"value": 2.0}}
                ]}
            ]
        }"#;
        let params: TreeEnsembleParams = serde_json::from_str(json).unwrap();
        let forest = TreeEnsemble::from_params(params).unwrap();
        assert_eq!(forest.predict(&features(5000.0, 0.0)).unwrap(), 2.0);
    }
}
