//! A CART-style binary decision tree with entropy splitting,
//! the base learner of the random forest.

/// Defines the decision tree learner.
pub mod dtree;
/// Defines the classifier produced by `DecisionTree`.
pub mod dtree_classifier;
/// Defines `DecisionTreeBuilder`.
pub mod builder;

/// Defines the inner representations of `DecisionTreeClassifier`.
pub mod node;
pub(crate) mod split_rule;
mod criterion;


pub use builder::{
    DecisionTreeBuilder,
    DEFAULT_MAX_DEPTH,
    DEFAULT_MIN_LEAF_SIZE,
    MAX_TREE_DEPTH,
};
pub use dtree::DecisionTree;
pub use dtree_classifier::DecisionTreeClassifier;
pub use node::Node;
pub use split_rule::{Splitter, LeftRight};
