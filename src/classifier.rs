//! The trait shared by every trained model of this crate.
use crate::{Dataset, Label};


/// A trait that defines the behavior of a trained classifier.
/// You only need to implement `predict`.
pub trait Classifier {
    /// Predicts the label of the feature row `x`.
    /// `x` must have at least as many values as the model was trained on.
    fn predict(&self, x: &[u64]) -> Label;


    /// Predicts the labels of every row of `dataset`, in row order.
    fn predict_all(&self, dataset: &Dataset) -> Vec<Label> {
        dataset.iter()
            .map(|(x, _)| self.predict(x))
            .collect()
    }
}
