//! Turning a record, its author, and the repository templates
//! into a fixed-width numeric vector.

/// Defines `FeatureVector` and the column names.
pub mod vector;
/// Defines the association-to-class table and the labeling policy.
pub mod association;
/// Defines `FeatureVectorizer`.
pub mod vectorizer;


pub use vector::{
    FeatureVector,
    FEATURE_NAMES,
    TARGET_NAME,
    N_FEATURES,
};
pub use association::{
    AssociationTable,
    SpamPolicy,
    CONTRIBUTOR_TIER,
};
pub use vectorizer::{
    FeatureVectorizer,
    account_age_days,
};
