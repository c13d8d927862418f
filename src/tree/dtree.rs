use rand::prelude::*;
use rand::seq::index;

use std::fmt;

use crate::{Dataset, SpamError};
use crate::error::Result;
use super::{
    node::Node,
    criterion,
    dtree_classifier::DecisionTreeClassifier,
};


/// The Decision Tree algorithm.
/// Given a dataset and the rows to train on,
/// [`DecisionTree`] outputs a [`DecisionTreeClassifier`]
/// grown by recursive binary partitioning.
///
/// At each node, `max_features` columns are drawn without replacement
/// and the `(feature, threshold)` pair with the largest information gain
/// among them splits the node.
/// A node becomes a leaf when its rows share one label,
/// it has fewer than `min_leaf_size` rows,
/// it is at `max_depth`, or no split reduces the entropy.
///
/// [`DecisionTree`] is constructed
/// by [`DecisionTreeBuilder`](crate::tree::DecisionTreeBuilder).
///
/// # Example
/// ```no_run
/// use rand::prelude::*;
/// use spamforest::prelude::*;
///
/// let dataset = Dataset::read_csv("cli-cli.csv").unwrap();
/// let tree = DecisionTreeBuilder::new(&dataset)
///     .max_depth(3)
///     .build();
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let indices = (0..dataset.len()).collect::<Vec<_>>();
/// let f = tree.fit(&dataset, &indices, &mut rng).unwrap();
///
/// let predictions = f.predict_all(&dataset);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecisionTree {
    n_feature: usize,
    max_features: usize,
    max_depth: usize,
    min_leaf_size: usize,
}


impl DecisionTree {
    /// Initialize [`DecisionTree`].
    /// This method is called only via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn new(
        n_feature: usize,
        max_features: usize,
        max_depth: usize,
        min_leaf_size: usize,
    ) -> Self
    {
        Self { n_feature, max_features, max_depth, min_leaf_size }
    }


    /// Grow a tree on the rows of `dataset` at `indices`.
    /// Indices may repeat (bootstrap samples).
    ///
    /// Fails with [`SpamError::EmptyTrainingSet`] if `indices` is empty.
    pub fn fit<R: Rng>(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        rng: &mut R,
    ) -> Result<DecisionTreeClassifier>
    {
        if indices.is_empty() {
            return Err(SpamError::EmptyTrainingSet);
        }
        let n_feature = dataset.shape().1;
        if n_feature != self.n_feature {
            return Err(SpamError::InvalidFeatureVector {
                expected: self.n_feature,
                found: n_feature,
            });
        }

        let n_classes = dataset.n_classes();
        let root = self.grow(
            dataset, indices.to_vec(), self.max_depth, n_classes, rng
        );

        Ok(DecisionTreeClassifier::from_root(*root, n_feature))
    }


    /// Construct a tree of depth at most `depth`.
    fn grow<R: Rng>(
        &self,
        dataset: &Dataset,
        indices: Vec<usize>,
        depth: usize,
        n_classes: usize,
        rng: &mut R,
    ) -> Box<Node>
    {
        let counts = criterion::distribution(dataset, &indices[..], n_classes);
        let label = criterion::majority(&counts[..]);

        let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_small = indices.len() < self.min_leaf_size;
        if is_pure || too_small || depth == 0 || self.n_feature == 0 {
            return Box::new(Node::leaf(label, counts));
        }

        // Draw the candidate features for this node.
        let mut features = index::sample(rng, self.n_feature, self.max_features)
            .into_vec();
        features.sort_unstable();

        let split = criterion::best_split(
            dataset, &indices[..], &features[..], &counts[..]
        );
        let Some((rule, _)) = split else {
            return Box::new(Node::leaf(label, counts));
        };

        // Split the train data for left/right children
        let (lindices, rindices): (Vec<_>, Vec<_>) = indices.into_iter()
            .partition(|&i| rule.split(dataset.row(i)).is_left());

        // If the split has no meaning, construct a leaf node.
        if lindices.is_empty() || rindices.is_empty() {
            return Box::new(Node::leaf(label, counts));
        }

        let depth = depth - 1;
        let left  = self.grow(dataset, lindices, depth, n_classes, rng);
        let right = self.grow(dataset, rindices, depth, n_classes, rng);

        Box::new(Node::branch(rule, left, right))
    }


    /// Number of candidate features per split.
    pub fn max_features(&self) -> usize {
        self.max_features
    }


    /// Maximal depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }


    /// Minimal number of rows for a node to be split.
    pub fn min_leaf_size(&self) -> usize {
        self.min_leaf_size
    }
}


impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\
            ----------\n\
            # Decision Tree\n\n\
            - Features per split: {} of {}\n\
            - Max depth: {}\n\
            - Min leaf size: {}\n\
            ----------\
            ",
            self.max_features,
            self.n_feature,
            self.max_depth,
            self.min_leaf_size,
        )
    }
}
