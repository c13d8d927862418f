//! Error taxonomy shared by every module of this crate.
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Label;


/// The error type returned by the fallible operations of this crate.
#[derive(Debug, Error)]
pub enum SpamError {
    /// A dataset with no rows was given to an operation that needs one.
    #[error("the dataset has no rows")]
    EmptyDataset,

    /// A decision tree was asked to grow from zero rows.
    #[error("cannot grow a decision tree from zero rows")]
    EmptyTrainingSet,

    /// Two sequences that must be parallel have different lengths.
    #[error("length mismatch: expected {expected} items, found {found}")]
    LengthMismatch {
        /// The length required by the operation.
        expected: usize,
        /// The length that was given.
        found: usize,
    },

    /// A feature vector does not have the column count of its dataset/model.
    #[error("invalid feature vector: expected {expected} columns, found {found}")]
    InvalidFeatureVector {
        /// Number of columns required.
        expected: usize,
        /// Number of columns given.
        found: usize,
    },

    /// A label other than `0` (legitimate) or `1` (spam).
    #[error("invalid label {label}: expected 0 (legitimate) or 1 (spam)")]
    InvalidLabel {
        /// The rejected value.
        label: u64,
    },

    /// The persisted model could not be decoded.
    #[error("corrupt model `{}`: {reason}", path.display())]
    CorruptModel {
        /// The model file.
        path: PathBuf,
        /// What went wrong while decoding.
        reason: String,
    },

    /// The persisted model was written by an incompatible format version.
    #[error(
        "corrupt model `{}`: format version mismatch (expected {expected}, found {found})",
        path.display()
    )]
    VersionMismatch {
        /// The model file.
        path: PathBuf,
        /// The version this build reads.
        expected: u16,
        /// The version stored in the file.
        found: u16,
    },

    /// A file or a record that was asked for does not exist.
    #[error("not found: {what}")]
    NotFound {
        /// Path or identifier of the missing item.
        what: String,
    },

    /// A line of a dataset file could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-indexed line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// A hyperparameter or configuration value is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other I/O failure, with the path being accessed.
    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        /// Underlying error.
        source: io::Error,
        /// The path being accessed.
        path: PathBuf,
    },

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure raised by `polars` while converting data frames.
    #[error("data frame error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}


/// Shorthand for results carrying [`SpamError`].
pub type Result<T> = std::result::Result<T, SpamError>;


impl SpamError {
    /// Wraps an I/O error raised while accessing `path`.
    /// `io::ErrorKind::NotFound` becomes [`SpamError::NotFound`].
    pub fn io<P: AsRef<Path>>(source: io::Error, path: P) -> Self {
        let path = path.as_ref();
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound { what: path.display().to_string() };
        }
        Self::Io { source, path: path.to_path_buf() }
    }
}


/// Non-fatal conditions detected while training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainWarning {
    /// Only one label value is present in the training data,
    /// so every prediction of the trained forest is that label.
    SingleClass {
        /// The only label observed.
        label: Label,
    },
}


impl fmt::Display for TrainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleClass { label } => write!(
                f,
                "only label {label} is present in the training data; \
                 predictions will be constant"
            ),
        }
    }
}
