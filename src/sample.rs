//! Struct `Dataset` holds the feature vectors of a batch of records.

// Provides the dataset struct.
pub(crate) mod dataset;
// Provides CSV reading/writing.
pub(crate) mod reader;
// Provides the train/test split.
pub(crate) mod split;
// Provides conversion from/to `polars::DataFrame`.
pub(crate) mod dataframe;


pub use dataset::Dataset;
pub use reader::DatasetReader;
