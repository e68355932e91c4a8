use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::models::{check_finite, check_probability, default_threshold};

/// One node of a flattened decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node: `x[feature] <= threshold` goes left, otherwise right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node carrying the positive-class probability
    Leaf { probability: f64 },
}

/// A single decision tree stored as a flat node array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, tree_index: usize, feature_count: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::schema(format!("tree {} has no nodes", tree_index)));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= feature_count {
                        return Err(ModelError::schema(format!(
                            "tree {} node {} splits on feature {} of {}",
                            tree_index, index, feature, feature_count
                        )));
                    }
                    check_finite("split threshold", &[*threshold])?;
                    // Children must point forward so traversal always terminates
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(ModelError::schema(format!(
                                "tree {} node {} has invalid child index {}",
                                tree_index, index, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { probability } => {
                    check_probability("leaf probability", *probability)?;
                }
            }
        }

        Ok(())
    }

    /// Walk from the root to a leaf and return its probability.
    ///
    /// Node and feature lookups are bounds-checked and every step must move
    /// forward, so a malformed tree yields an error instead of a panic or an
    /// endless walk.
    pub fn leaf_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = features.get(*feature).ok_or_else(|| {
                        ModelError::schema(format!(
                            "node {} splits on missing feature {}",
                            index, feature
                        ))
                    })?;
                    let next = if *value <= *threshold { *left } else { *right };
                    if next <= index {
                        return Err(ModelError::schema(format!(
                            "node {} points back to node {}",
                            index, next
                        )));
                    }
                    index = next;
                }
                Some(TreeNode::Leaf { probability }) => return Ok(*probability),
                None => {
                    return Err(ModelError::schema(format!("tree has no node {}", index)));
                }
            }
        }
    }
}

/// Averaged ensemble of decision trees (random-forest style)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleParams {
    pub trees: Vec<DecisionTree>,

    /// Probability at or above which the positive class is predicted
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl TreeEnsembleParams {
    pub(crate) fn validate(&self, feature_count: usize) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::schema("tree ensemble must contain at least one tree"));
        }
        check_probability("threshold", self.threshold)?;
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, feature_count)?;
        }
        Ok(())
    }

    /// Mean leaf probability across all trees
    pub fn positive_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::schema("tree ensemble has no trees"));
        }
        let total = self
            .trees
            .iter()
            .map(|t| t.leaf_probability(features))
            .sum::<Result<f64, ModelError>>()?;
        Ok(total / self.trees.len() as f64)
    }
}
