use serde::{Serialize, Deserialize};

use crate::{Label, SpamError};
use crate::error::Result;
use crate::sample::dataset::check_label;


/// Number of feature columns (the label excluded).
pub const N_FEATURES: usize = 9;

/// Names of the feature columns, in vector order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "association",
    "contributions",
    "repos",
    "age",
    "followers",
    "following",
    "body_len",
    "title_len",
    "sim_score",
];

/// Name of the label column.
pub const TARGET_NAME: &str = "is_spam";


/// The features of one record.
/// Every value is a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Ordinal class of the author's association to the repository.
    pub association: u64,
    /// Author's contributions in the last year.
    pub contributions: u64,
    /// Number of repositories the author contributed to.
    pub repos: u64,
    /// Whole days between account creation and record creation.
    pub age: u64,
    /// Author's follower count.
    pub followers: u64,
    /// Author's following count.
    pub following: u64,
    /// Number of characters in the body.
    pub body_len: u64,
    /// Number of characters in the title.
    pub title_len: u64,
    /// Maximum similarity between the body and the repository templates.
    pub sim_score: u64,
    /// `1` if spam, `0` otherwise.
    pub is_spam: Label,
}


impl FeatureVector {
    /// The feature values in column order, the label excluded.
    pub fn features(&self) -> [u64; N_FEATURES] {
        [
            self.association,
            self.contributions,
            self.repos,
            self.age,
            self.followers,
            self.following,
            self.body_len,
            self.title_len,
            self.sim_score,
        ]
    }


    /// The label of this vector.
    #[inline]
    pub fn label(&self) -> Label {
        self.is_spam
    }


    /// Rebuild a vector from a dataset row.
    pub fn from_row(row: &[u64], label: Label) -> Result<Self> {
        if row.len() != N_FEATURES {
            return Err(SpamError::InvalidFeatureVector {
                expected: N_FEATURES,
                found: row.len(),
            });
        }
        let label = check_label(label as u64)?;
        let vector = Self {
            association:   row[0],
            contributions: row[1],
            repos:         row[2],
            age:           row[3],
            followers:     row[4],
            following:     row[5],
            body_len:      row[6],
            title_len:     row[7],
            sim_score:     row[8],
            is_spam:       label,
        };
        Ok(vector)
    }
}
