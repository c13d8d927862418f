use crate::Dataset;
use super::dtree::DecisionTree;


/// The maximal depth set as default.
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Nodes with fewer rows than this become leaves.
pub const DEFAULT_MIN_LEAF_SIZE: usize = 2;
/// Upper bound of `max_depth`.
/// Saved models declaring a deeper tree are rejected on load.
pub const MAX_TREE_DEPTH: usize = 256;


/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```no_run
/// use spamforest::prelude::*;
///
/// let dataset = Dataset::read_csv("cli-cli.csv").unwrap();
/// let tree = DecisionTreeBuilder::new(&dataset)
///     .max_depth(4)
///     .max_features(3)
///     .build();
/// ```
#[derive(Clone)]
pub struct DecisionTreeBuilder {
    n_feature: usize,
    max_features: usize,
    max_depth: usize,
    min_leaf_size: usize,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// max_features: all feature columns,
    /// max_depth: DEFAULT_MAX_DEPTH == 32,
    /// min_leaf_size: DEFAULT_MIN_LEAF_SIZE == 2,
    /// ```
    pub fn new(dataset: &Dataset) -> Self {
        let n_feature = dataset.shape().1;
        Self {
            n_feature,
            max_features: n_feature,
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
        }
    }


    /// Number of feature columns drawn (without replacement)
    /// as split candidates at each node.
    /// Values above the number of columns are clamped.
    pub fn max_features(mut self, max_features: usize) -> Self {
        assert!(max_features > 0, "Tree must consider at least one feature");
        self.max_features = max_features;
        self
    }


    /// Specify the maximal depth of the tree.
    /// A tree of depth `0` is a single leaf.
    /// Values above [`MAX_TREE_DEPTH`] are clamped.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.min(MAX_TREE_DEPTH);
        self
    }


    /// Nodes with fewer rows than `size` are not split.
    pub fn min_leaf_size(mut self, size: usize) -> Self {
        self.min_leaf_size = size;
        self
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> DecisionTree {
        let max_features = self.max_features.min(self.n_feature).max(1);
        DecisionTree::new(
            self.n_feature,
            max_features,
            self.max_depth,
            self.min_leaf_size,
        )
    }
}
