use std::collections::HashMap;

use crate::{Label, SpamError, N_CLASSES};
use crate::error::Result;
use crate::feature::{FeatureVector, FEATURE_NAMES, TARGET_NAME};


/// An ordered collection of `(feature row, label)` pairs
/// with the column names.
/// Every row has exactly `feature_names().len()` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub(super) feature_names: Vec<String>,
    pub(super) target_name: String,
    pub(super) rows: Vec<Vec<u64>>,
    pub(super) target: Vec<Label>,
}


impl Default for Dataset {
    /// An empty dataset with the columns of [`FeatureVector`].
    fn default() -> Self {
        Self::new(FEATURE_NAMES, TARGET_NAME)
    }
}


impl Dataset {
    /// Construct an empty dataset with the given columns.
    pub fn new<I, S, T>(feature_names: I, target_name: T) -> Self
        where I: IntoIterator<Item = S>,
              S: ToString,
              T: ToString,
    {
        let feature_names = feature_names.into_iter()
            .map(|name| name.to_string())
            .collect();
        Self {
            feature_names,
            target_name: target_name.to_string(),
            rows: Vec::new(),
            target: Vec::new(),
        }
    }


    /// Collect feature vectors into a dataset with the standard columns.
    pub fn from_vectors<'a, I>(vectors: I) -> Result<Self>
        where I: IntoIterator<Item = &'a FeatureVector>
    {
        let mut dataset = Self::default();
        for vector in vectors {
            dataset.push_vector(vector)?;
        }
        Ok(dataset)
    }


    /// Append a row.
    /// Fails with [`SpamError::InvalidFeatureVector`] if the row
    /// does not have one value per feature column,
    /// and with [`SpamError::InvalidLabel`] unless `label` is `0` or `1`.
    /// On failure the dataset is left unchanged.
    pub fn push(&mut self, row: Vec<u64>, label: Label) -> Result<()> {
        let n_feature = self.feature_names.len();
        if row.len() != n_feature {
            return Err(SpamError::InvalidFeatureVector {
                expected: n_feature,
                found: row.len(),
            });
        }
        let label = check_label(label as u64)?;
        self.rows.push(row);
        self.target.push(label);
        Ok(())
    }


    /// Append a feature vector.
    /// Fails like [`Dataset::push`] when the dataset does not have
    /// the standard column count or the label is not binary.
    pub fn push_vector(&mut self, vector: &FeatureVector) -> Result<()> {
        self.push(vector.features().to_vec(), vector.label())
    }


    /// Returns the pair of the number of rows and
    /// the number of feature columns.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.feature_names.len())
    }


    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }


    /// Returns `true` if there is no row.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }


    /// Names of the feature columns.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names[..]
    }


    /// Name of the label column.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }


    /// All column names; the label column comes last.
    pub fn header(&self) -> Vec<&str> {
        self.feature_names.iter()
            .map(String::as_str)
            .chain(std::iter::once(self.target_name.as_str()))
            .collect()
    }


    /// Returns the `idx`-th feature row.
    #[inline]
    pub fn row(&self, idx: usize) -> &[u64] {
        &self.rows[idx][..]
    }


    /// Returns the labels.
    #[inline]
    pub fn target(&self) -> &[Label] {
        &self.target[..]
    }


    /// Returns the `idx`-th example `(x, y)`.
    pub fn at(&self, idx: usize) -> (&[u64], Label) {
        (&self.rows[idx][..], self.target[idx])
    }


    /// Iterates over `(x, y)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u64], Label)> + '_ {
        self.rows.iter()
            .map(|row| &row[..])
            .zip(self.target.iter().copied())
    }


    /// Number of classes. Labels are binary, so this is always `2`.
    #[inline]
    pub fn n_classes(&self) -> usize {
        N_CLASSES
    }


    /// Number of rows per label, indexed by label.
    pub fn label_counts(&self) -> Vec<usize> {
        let mut counts = vec![0_usize; self.n_classes()];
        for &y in &self.target {
            counts[y] += 1;
        }
        counts
    }


    /// The distinct labels with their number of rows, sorted by label.
    pub fn distinct_labels(&self) -> Vec<(Label, usize)> {
        let mut map = HashMap::new();
        for &y in &self.target {
            *map.entry(y).or_insert(0_usize) += 1;
        }
        let mut labels = map.into_iter().collect::<Vec<_>>();
        labels.sort_unstable();
        labels
    }


    /// Returns a new dataset that consists of the rows at `indices`,
    /// in the given order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        let rows = indices.iter()
            .map(|&i| self.rows[i].clone())
            .collect();
        let target = indices.iter()
            .map(|&i| self.target[i])
            .collect();

        Self {
            feature_names: self.feature_names.clone(),
            target_name: self.target_name.clone(),
            rows,
            target,
        }
    }


    /// Convert every row back to a [`FeatureVector`].
    /// The dataset must have the standard column count.
    pub fn vectors(&self) -> Result<Vec<FeatureVector>> {
        self.iter()
            .map(|(x, y)| FeatureVector::from_row(x, y))
            .collect()
    }
}


/// Returns `value` as a [`Label`] if it is `0` or `1`.
pub(crate) fn check_label(value: u64) -> Result<Label> {
    if value < N_CLASSES as u64 {
        Ok(value as Label)
    } else {
        Err(SpamError::InvalidLabel { label: value })
    }
}
