use crate::Dataset;
use crate::error::Result;
use crate::tree::DecisionTreeBuilder;
use super::{
    params::ForestParams,
    random_forest::RandomForest,
};


/// A struct that builds `RandomForest`.
/// `RandomForestBuilder` keeps parameters for constructing `RandomForest`.
///
/// # Example
///
/// ```no_run
/// use spamforest::prelude::*;
///
/// let dataset = Dataset::read_csv("cli-cli.csv").unwrap();
/// let forest = RandomForestBuilder::new(&dataset)
///     .n_trees(64)
///     .max_depth(12)
///     .seed(777)
///     .build()
///     .unwrap();
/// let f = forest.fit().unwrap();
/// ```
#[derive(Clone)]
pub struct RandomForestBuilder<'a> {
    dataset: &'a Dataset,
    params: ForestParams,
    parallel: bool,
}


impl<'a> RandomForestBuilder<'a> {
    /// Construct a new instance of [`RandomForestBuilder`].
    /// By default, [`RandomForestBuilder`] sets the parameters as follows;
    /// ```text
    /// n_trees: DEFAULT_N_TREES == 70,
    /// max_features: (# of features) - 1,
    /// max_depth: DEFAULT_MAX_DEPTH == 32,
    /// min_leaf_size: DEFAULT_MIN_LEAF_SIZE == 2,
    /// seed: DEFAULT_SEED == 42,
    /// parallel: true,
    /// ```
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset, params: ForestParams::default(), parallel: true }
    }


    /// Replace every hyperparameter at once.
    pub fn params(mut self, params: ForestParams) -> Self {
        self.params = params;
        self
    }


    /// Set the number of trees.
    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.params.n_trees = n_trees;
        self
    }


    /// Set the number of candidate features per split.
    pub fn max_features(mut self, max_features: usize) -> Self {
        self.params.max_features = Some(max_features);
        self
    }


    /// Set the maximal depth of each tree.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.params.max_depth = depth;
        self
    }


    /// Nodes with fewer rows than `size` are not split.
    pub fn min_leaf_size(mut self, size: usize) -> Self {
        self.params.min_leaf_size = size;
        self
    }


    /// Set the seed of the randomness.
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }


    /// Train the trees on worker threads (`true`, default)
    /// or one after another.
    /// The trained forest is the same either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Build a `RandomForest`.
    /// Fails if the parameters do not fit the dataset.
    pub fn build(self) -> Result<RandomForest<'a>> {
        let n_feature = self.dataset.shape().1;
        let hyper = self.params.resolve(n_feature)?;

        let tree = DecisionTreeBuilder::new(self.dataset)
            .max_features(hyper.max_features)
            .max_depth(hyper.max_depth)
            .min_leaf_size(hyper.min_leaf_size)
            .build();

        Ok(RandomForest::new(self.dataset, tree, hyper, self.parallel))
    }
}
