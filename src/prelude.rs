//! Exports the types needed to build a dataset,
//! train a forest, and evaluate it.
//!
pub use crate::{
    Label,
    N_CLASSES,
    SpamError,
    TrainWarning,
};


pub use crate::record::{
    Record,
    Author,
    Template,
    Repository,
};


pub use crate::similarity::SimilarityScorer;


pub use crate::feature::{
    FeatureVector,
    FeatureVectorizer,
    AssociationTable,
    SpamPolicy,
};


pub use crate::sample::{
    Dataset,
    DatasetReader,
};


pub use crate::classifier::Classifier;


pub use crate::tree::{
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
};


pub use crate::forest::{
    ForestParams,
    RandomForest,
    RandomForestBuilder,
    RandomForestClassifier,
    Votes,
};


pub use crate::evaluation::{
    ConfusionMatrix,
    Summary,
};


pub use crate::source::{
    RecordSource,
    RecordFilter,
    JsonSource,
};


pub use crate::pipeline::{
    AuthorCache,
    build_dataset,
    classify_record,
};


pub use crate::logging::Logger;
