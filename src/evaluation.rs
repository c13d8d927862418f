//! Confusion matrix and the statistics derived from it.
use std::fmt;

use crate::{Dataset, Label, SpamError, N_CLASSES};
use crate::error::Result;
use crate::sample::dataset::check_label;


/// A square table counting `(true label, predicted label)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
}


impl ConfusionMatrix {
    /// Compare the labels of `dataset` with `predictions`, row by row.
    ///
    /// Fails with [`SpamError::LengthMismatch`]
    /// unless there is exactly one prediction per row.
    pub fn new(dataset: &Dataset, predictions: &[Label]) -> Result<Self> {
        Self::from_labels(dataset.target(), predictions)
    }


    /// Compare two parallel label sequences.
    ///
    /// Fails with [`SpamError::InvalidLabel`]
    /// if either sequence holds a label other than `0` or `1`.
    pub fn from_labels(truth: &[Label], predictions: &[Label])
        -> Result<Self>
    {
        if truth.len() != predictions.len() {
            return Err(SpamError::LengthMismatch {
                expected: truth.len(),
                found: predictions.len(),
            });
        }

        let mut counts = vec![vec![0_usize; N_CLASSES]; N_CLASSES];
        for (&t, &p) in truth.iter().zip(predictions) {
            let t = check_label(t as u64)?;
            let p = check_label(p as u64)?;
            counts[t][p] += 1;
        }
        Ok(Self { counts })
    }


    /// Number of classes, i.e., the side of the table.
    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }


    /// Number of rows labeled `truth` and predicted as `predicted`.
    /// Labels outside the table count `0`.
    pub fn get(&self, truth: Label, predicted: Label) -> usize {
        self.counts.get(truth)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }


    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }


    /// Number of correct predictions.
    pub fn correct(&self) -> usize {
        (0..self.n_classes()).map(|k| self.counts[k][k]).sum()
    }


    /// Compute accuracy and the per-class statistics.
    pub fn summary(&self) -> Summary {
        let total = self.total();
        let n_classes = self.n_classes();

        let classes = (0..n_classes)
            .map(|k| {
                let tp = self.counts[k][k];
                let actual = self.counts[k].iter().sum::<usize>();
                let predicted = self.counts.iter()
                    .map(|row| row[k])
                    .sum::<usize>();
                let fp = predicted - tp;
                let fn_ = actual - tp;
                let tn = total - tp - fp - fn_;

                let precision = ratio(tp, predicted);
                let recall = ratio(tp, actual);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };

                ClassSummary {
                    label: k,
                    true_positives: tp,
                    false_positives: fp,
                    true_negatives: tn,
                    precision,
                    recall,
                    f1,
                }
            })
            .collect();

        Summary {
            accuracy: ratio(self.correct(), total),
            classes,
        }
    }
}


/// `num / den`, or `0` when `den == 0`.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>12}", "true\\pred")?;
        for k in 0..self.n_classes() {
            write!(f, "{k:>8}")?;
        }
        for (k, row) in self.counts.iter().enumerate() {
            write!(f, "\n{k:>12}")?;
            for count in row {
                write!(f, "{count:>8}")?;
            }
        }
        Ok(())
    }
}


/// Statistics of one class, treating it as the positive class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    /// The class.
    pub label: Label,
    /// Rows of this class predicted as this class.
    pub true_positives: usize,
    /// Rows of other classes predicted as this class.
    pub false_positives: usize,
    /// Rows of other classes predicted as another class.
    pub true_negatives: usize,
    /// `tp / (tp + fp)`, `0` if the class was never predicted.
    pub precision: f64,
    /// `tp / (tp + fn)`, `0` if the class never occurs.
    pub recall: f64,
    /// Harmonic mean of precision and recall, `0` if both are `0`.
    pub f1: f64,
}


/// Accuracy and per-class statistics of a [`ConfusionMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Fraction of correct predictions, `0` for an empty matrix.
    pub accuracy: f64,
    /// One entry per class, indexed by label.
    pub classes: Vec<ClassSummary>,
}


impl Summary {
    /// Precision of `label`, `0` for unknown labels.
    pub fn precision(&self, label: Label) -> f64 {
        self.classes.get(label).map_or(0.0, |c| c.precision)
    }


    /// Recall of `label`, `0` for unknown labels.
    pub fn recall(&self, label: Label) -> f64 {
        self.classes.get(label).map_or(0.0, |c| c.recall)
    }


    /// F1 score of `label`, `0` for unknown labels.
    pub fn f1(&self, label: Label) -> f64 {
        self.classes.get(label).map_or(0.0, |c| c.f1)
    }
}


impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16}{:>16}{:>16}{:>16}{:>12}{:>12}{:>12}",
            "Reference Class",
            "True Positives",
            "False Positives",
            "True Negatives",
            "Precision",
            "Recall",
            "F1 Score",
        )?;
        writeln!(
            f,
            "{:<16}{:>16}{:>16}{:>16}{:>12}{:>12}{:>12}",
            "---------------",
            "--------------",
            "---------------",
            "--------------",
            "---------",
            "------",
            "--------",
        )?;
        for c in &self.classes {
            writeln!(
                f,
                "{:<16}{:>16}{:>16}{:>16}{:>12.4}{:>12.4}{:>12.4}",
                c.label,
                c.true_positives,
                c.false_positives,
                c.true_negatives,
                c.precision,
                c.recall,
                c.f1,
            )?;
        }
        write!(f, "Overall accuracy: {:.4}", self.accuracy)
    }
}
