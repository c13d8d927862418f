#![warn(missing_docs)]

//!
//! A crate that classifies issue reports as spam or legitimate
//! with a random forest.
//!
//! The pipeline is
//!
//! - [`RecordSource`](source::RecordSource)
//!     provides records, author profiles and issue templates.
//! - [`FeatureVectorizer`](feature::FeatureVectorizer)
//!     turns each record into a fixed-width [`FeatureVector`](feature::FeatureVector).
//!     One of the features is the [`SimilarityScorer`](similarity::SimilarityScorer)
//!     score of the body against the repository templates.
//! - [`Dataset`] collects the vectors and reads/writes them as CSV.
//! - [`RandomForest`](forest::RandomForest) trains
//!     bootstrap-aggregated decision trees on a dataset.
//! - [`model_store`] saves and loads the trained
//!     [`RandomForestClassifier`](forest::RandomForestClassifier).
//! - [`ConfusionMatrix`](evaluation::ConfusionMatrix) evaluates predictions.
//!
//! ```no_run
//! use spamforest::prelude::*;
//!
//! let source = JsonSource::open("snapshot").unwrap();
//! let repository: Repository = "cli/cli".parse().unwrap();
//! let vectorizer = FeatureVectorizer::default();
//!
//! let dataset = build_dataset(&source, &repository, &vectorizer).unwrap();
//! let (train, test) = dataset.train_test_split(0.2, 42).unwrap();
//!
//! let forest = RandomForestBuilder::new(&train)
//!     .n_trees(70)
//!     .build()
//!     .unwrap();
//! let model = forest.fit().unwrap();
//!
//! let predictions = model.predict_batch(&test).unwrap();
//! let matrix = ConfusionMatrix::new(&test, &predictions).unwrap();
//! println!("{}", matrix.summary());
//!
//! model.save("cli-cli.model").unwrap();
//! ```

pub mod error;
pub mod similarity;
pub mod record;
pub mod feature;
pub mod sample;
pub mod classifier;
pub mod tree;
pub mod forest;
pub mod model_store;
pub mod evaluation;
pub mod source;
pub mod pipeline;
pub mod logging;

pub mod prelude;


/// Class label: `0` is legitimate, `1` is spam.
pub type Label = usize;


/// Number of distinct labels.
pub const N_CLASSES: usize = 2;


pub use error::{SpamError, TrainWarning};
pub use sample::{Dataset, DatasetReader};
pub use classifier::Classifier;
