//! This file defines the split rule for decision tree.
use serde::{Serialize, Deserialize};


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    /// `x[feature] <= threshold`.
    Left,
    /// `x[feature] > threshold`.
    Right,
}


impl LeftRight {
    /// Returns `true` for `LeftRight::Left`.
    #[inline]
    pub fn is_left(self) -> bool {
        self == Self::Left
    }
}


/// A threshold test on one feature column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    /// Index of the feature column.
    pub feature: usize,
    /// Values at or below the threshold go left.
    pub threshold: f64,
}


impl Splitter {
    /// Construct a new `Splitter`.
    #[inline]
    pub fn new(feature: usize, threshold: f64) -> Self {
        Self { feature, threshold }
    }


    /// Defines the splitting.
    #[inline]
    pub fn split(&self, x: &[u64]) -> LeftRight {
        if x[self.feature] as f64 <= self.threshold {
            LeftRight::Left
        } else {
            LeftRight::Right
        }
    }
}
