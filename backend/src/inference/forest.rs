//! Random-forest classifier exported to JSON.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "model_type": "RandomForestClassifier",
//!   "n_features": 9,
//!   "classes": [0, 1, 2],
//!   "trees": [
//!     {"nodes": [
//!       {"feature": 0, "threshold": 6.5, "left": 1, "right": 2},
//!       {"value": [12.0, 1.0, 0.0]},
//!       {"value": [0.0, 3.0, 9.0]}
//!     ]}
//!   ]
//! }
//! ```
//!
//! A split sends a row left when `x[feature] <= threshold`. Leaf values are
//! per-class sample weights; each tree votes with its normalized leaf and the
//! forest predicts the class with the highest mean probability.

use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, InferenceError};
use super::Classifier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Leaf distribution reached by a row. Assumes a validated tree.
    fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!("node {} splits on feature {}", idx, feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", idx));
                    }
                    // Children must point forward, which rules out cycles.
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", idx, child));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(format!(
                            "leaf {} has {} class weights, expected {}",
                            idx,
                            value.len(),
                            n_classes
                        ));
                    }
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                        return Err(format!("leaf {} has invalid weights", idx));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    #[serde(default = "default_model_type")]
    pub model_type: String,
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
}

fn default_model_type() -> String {
    "RandomForestClassifier".to_string()
}

impl RandomForestClassifier {
    /// Parse and validate a JSON artifact.
    pub fn from_json_str(json: &str) -> Result<Self, ArtifactError> {
        let forest: Self = serde_json::from_str(json)
            .map_err(|e| ArtifactError::invalid(format!("malformed forest: {}", e)))?;
        forest.validate()?;
        Ok(forest)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.n_features == 0 {
            return Err(ArtifactError::invalid("forest declares zero features"));
        }
        if self.classes.is_empty() {
            return Err(ArtifactError::invalid("forest declares no classes"));
        }
        if self.trees.is_empty() {
            return Err(ArtifactError::invalid("forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| ArtifactError::invalid(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }

    /// Mean class probabilities across trees.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.n_features {
            return Err(InferenceError::ShapeMismatch {
                expected: self.n_features,
                got: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|v| !v.is_finite()) {
            return Err(InferenceError::NonFiniteFeature { index });
        }
        if self.trees.is_empty() {
            return Err(InferenceError::EmptyModel);
        }

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(features);
            let total: f64 = leaf.iter().sum();
            if total > 0.0 {
                for (p, w) in proba.iter_mut().zip(leaf) {
                    *p += w / total;
                }
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

impl Classifier for RandomForestClassifier {
    fn predict(&self, features: &[f64]) -> Result<usize, InferenceError> {
        let proba = self.predict_proba(features)?;

        // Ties resolve to the lowest class index.
        let best = proba
            .iter()
            .enumerate()
            .fold(0, |best, (i, p)| if *p > proba[best] { i } else { best });

        let class = self.classes[best];
        usize::try_from(class).map_err(|_| InferenceError::UnknownClass(class))
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    fn leaf(value: &[f64]) -> TreeNode {
        TreeNode::Leaf {
            value: value.to_vec(),
        }
    }

    fn stump(threshold: f64, low: &[f64], high: &[f64]) -> DecisionTree {
        DecisionTree {
            nodes: vec![split(0, threshold, 1, 2), leaf(low), leaf(high)],
        }
    }

    fn forest(trees: Vec<DecisionTree>) -> RandomForestClassifier {
        RandomForestClassifier {
            model_type: default_model_type(),
            n_features: 2,
            classes: vec![0, 1, 2],
            trees,
        }
    }

    #[test]
    fn test_single_tree_routing() {
        let f = forest(vec![stump(5.0, &[10.0, 0.0, 0.0], &[0.0, 0.0, 4.0])]);
        assert_eq!(f.predict(&[5.0, 0.0]).unwrap(), 0);
        assert_eq!(f.predict(&[5.1, 0.0]).unwrap(), 2);
    }

    #[test]
    fn test_mean_of_normalized_leaf_probabilities() {
        // Raw weights would favour class 0 (60 vs 42); normalized they average to [0.2, 0.8, 0].
        let f = forest(vec![
            stump(5.0, &[60.0, 40.0, 0.0], &[60.0, 40.0, 0.0]),
            stump(5.0, &[0.0, 1.0, 0.0], &[0.0, 1.0, 0.0]),
            stump(5.0, &[0.0, 1.0, 0.0], &[0.0, 1.0, 0.0]),
        ]);
        let proba = f.predict_proba(&[0.0, 0.0]).unwrap();
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((proba[0] - 0.2).abs() < 1e-9);
        assert!((proba[1] - 0.8).abs() < 1e-9);
        assert_eq!(f.predict(&[0.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn test_confident_tree_outweighs_moderate_ones() {
        let f = forest(vec![
            stump(5.0, &[100.0, 0.0, 0.0], &[100.0, 0.0, 0.0]),
            stump(5.0, &[1.0, 2.0, 0.0], &[1.0, 2.0, 0.0]),
            stump(5.0, &[1.0, 2.0, 0.0], &[1.0, 2.0, 0.0]),
        ]);
        // Mean probabilities are [5/9, 4/9, 0].
        assert_eq!(f.predict(&[0.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn test_tie_goes_to_lowest_class() {
        let f = forest(vec![stump(5.0, &[1.0, 1.0, 0.0], &[0.0, 1.0, 1.0])]);
        assert_eq!(f.predict(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(f.predict(&[9.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn test_input_checks() {
        let f = forest(vec![stump(5.0, &[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0])]);
        assert_eq!(
            f.predict(&[1.0]),
            Err(InferenceError::ShapeMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            f.predict(&[1.0, f64::NAN]),
            Err(InferenceError::NonFiniteFeature { index: 1 })
        );
    }

    #[test]
    fn test_negative_class_label_is_rejected() {
        let mut f = forest(vec![stump(5.0, &[1.0, 0.0, 0.0], &[0.0, 0.0, 1.0])]);
        f.classes = vec![-1, 1, 2];
        assert_eq!(f.predict(&[0.0, 0.0]), Err(InferenceError::UnknownClass(-1)));
    }

    #[test]
    fn test_validation_rejects_bad_structure() {
        let backwards = DecisionTree {
            nodes: vec![leaf(&[1.0, 0.0, 0.0]), split(0, 1.0, 0, 0)],
        };
        assert!(forest(vec![backwards]).validate().is_err());

        let wide_leaf = stump(1.0, &[1.0, 0.0], &[0.0, 0.0, 1.0]);
        assert!(forest(vec![wide_leaf]).validate().is_err());

        let bad_feature = DecisionTree {
            nodes: vec![split(7, 1.0, 1, 2), leaf(&[1.0, 0.0, 0.0]), leaf(&[0.0, 1.0, 0.0])],
        };
        assert!(forest(vec![bad_feature]).validate().is_err());

        assert!(forest(vec![]).validate().is_err());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "n_features": 2,
            "classes": [0, 1, 2],
            "trees": [{"nodes": [
                {"feature": 1, "threshold": 0.5, "left": 1, "right": 2},
                {"value": [0.0, 5.0, 0.0]},
                {"value": [0.0, 0.0, 5.0]}
            ]}]
        }"#;
        let f = RandomForestClassifier::from_json_str(json).unwrap();
        assert_eq!(f.model_type(), "RandomForestClassifier");
        assert_eq!(f.predict(&[0.0, 0.0]).unwrap(), 1);
        assert_eq!(f.predict(&[0.0, 1.0]).unwrap(), 2);

        assert!(RandomForestClassifier::from_json_str("{}").is_err());
    }
}
