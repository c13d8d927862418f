//! Bootstrap-aggregated decision trees.

/// Defines the hyperparameters.
pub mod params;
/// Defines `RandomForestBuilder`.
pub mod builder;
/// Defines the random forest algorithm.
pub mod random_forest;
/// Defines the classifier produced by `RandomForest`.
pub mod rf_classifier;


pub use params::{
    ForestParams,
    Hyperparameters,
    DEFAULT_N_TREES,
    DEFAULT_SEED,
};
pub use builder::RandomForestBuilder;
pub use random_forest::{
    RandomForest,
    TreeReport,
};
pub use rf_classifier::{
    RandomForestClassifier,
    Votes,
};
