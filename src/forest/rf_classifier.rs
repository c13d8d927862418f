//! Defines the random forest classifier.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{Classifier, Dataset, Label, SpamError};
use crate::error::Result;
use crate::tree::DecisionTreeClassifier;
use super::params::Hyperparameters;


/// A trained random forest.
/// Owns its trees; predictions are the majority vote of the trees.
///
/// [`crate::model_store`] is the persistence format of record.
/// The `serde` derives offer a second route, e.g. `serde_json`,
/// for tools that want a readable dump of the trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestClassifier {
    hyper: Hyperparameters,
    trees: Vec<DecisionTreeClassifier>,
    n_feature: usize,
    n_classes: usize,
    oob_error: Option<f64>,
}


/// The vote breakdown behind a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Votes {
    /// The predicted label.
    pub label: Label,
    /// Number of trees voting for each label.
    pub votes: Vec<usize>,
    /// Fraction of the trees voting for `label`.
    pub confidence: f64,
}


impl RandomForestClassifier {
    /// Assemble a forest from its parts.
    pub(crate) fn from_parts(
        hyper: Hyperparameters,
        trees: Vec<DecisionTreeClassifier>,
        n_feature: usize,
        n_classes: usize,
        oob_error: Option<f64>,
    ) -> Self
    {
        Self { hyper, trees, n_feature, n_classes, oob_error }
    }


    /// The hyperparameters the forest was trained with.
    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyper
    }


    /// The trees, in training order.
    pub fn trees(&self) -> &[DecisionTreeClassifier] {
        &self.trees[..]
    }


    /// Number of feature columns.
    pub fn n_feature(&self) -> usize {
        self.n_feature
    }


    /// Number of classes seen at training time.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }


    /// Out-of-bag error estimated at training time.
    pub fn oob_error(&self) -> Option<f64> {
        self.oob_error
    }


    /// Counts the votes of every tree for `x`.
    pub fn predict_with_votes(&self, x: &[u64]) -> Votes {
        let mut votes = vec![0_usize; self.n_classes];
        for tree in &self.trees {
            let y = tree.predict(x);
            if y < self.n_classes {
                votes[y] += 1;
            }
        }

        let label = majority_vote(&votes[..]);
        let n_trees = self.trees.len().max(1) as f64;
        let confidence = votes[label] as f64 / n_trees;

        Votes { label, votes, confidence }
    }


    /// Predicts the label of `x` after checking its length.
    pub fn try_predict(&self, x: &[u64]) -> Result<Label> {
        self.check_width(x.len())?;
        Ok(self.predict(x))
    }


    /// Predicts every row of `dataset`, preserving row order.
    /// Fails if the dataset does not have the trained column count.
    pub fn predict_batch(&self, dataset: &Dataset) -> Result<Vec<Label>> {
        self.check_width(dataset.shape().1)?;

        let predictions = (0..dataset.len()).into_par_iter()
            .map(|i| self.predict(dataset.row(i)))
            .collect();
        Ok(predictions)
    }


    fn check_width(&self, width: usize) -> Result<()> {
        if width != self.n_feature {
            return Err(SpamError::InvalidFeatureVector {
                expected: self.n_feature,
                found: width,
            });
        }
        Ok(())
    }
}


impl Classifier for RandomForestClassifier {
    fn predict(&self, x: &[u64]) -> Label {
        self.predict_with_votes(x).label
    }
}


/// Returns the label with the most votes.
/// Ties are broken toward the smallest label.
pub(crate) fn majority_vote(votes: &[usize]) -> Label {
    votes.iter()
        .enumerate()
        .fold(0, |best, (y, &v)| if v > votes[best] { y } else { best })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    #[test]
    fn majority_vote_breaks_ties_toward_zero() {
        assert_eq!(majority_vote(&[3, 3]), 0);
        assert_eq!(majority_vote(&[0, 0]), 0);
        assert_eq!(majority_vote(&[2, 5]), 1);
        assert_eq!(majority_vote(&[5, 2]), 0);
    }

    #[test]
    fn even_split_forest_predicts_zero() {
        let hyper = Hyperparameters {
            n_trees: 4,
            max_features: 1,
            max_depth: 0,
            min_leaf_size: 2,
            seed: 0,
        };
        let trees = [1, 0, 1, 0].into_iter()
            .map(|y| {
                let mut distribution = vec![0, 0];
                distribution[y] = 1;
                DecisionTreeClassifier::from_root(Node::leaf(y, distribution), 1)
            })
            .collect();
        let forest = RandomForestClassifier::from_parts(
            hyper, trees, 1, 2, None,
        );

        let votes = forest.predict_with_votes(&[7]);
        assert_eq!(votes.votes, [2, 2]);
        assert_eq!(votes.label, 0);
        assert_eq!(votes.confidence, 0.5);
    }
}
