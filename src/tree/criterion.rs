//! Entropy-based selection of the split of a node.
use rayon::prelude::*;

use crate::{Dataset, Label};
use super::split_rule::Splitter;


/// Gains at or below this value are regarded as no improvement.
const GAIN_TOLERANCE: f64 = 1e-12;


/// Returns the binary entropy (in bits) of a class distribution.
#[inline]
pub(super) fn entropy(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>();
    if total == 0 { return 0f64; }

    let total = total as f64;
    counts.iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
}


/// Returns the class distribution of the rows at `indices`.
#[inline]
pub(super) fn distribution(
    dataset: &Dataset,
    indices: &[usize],
    n_classes: usize,
) -> Vec<usize>
{
    let target = dataset.target();
    let mut counts = vec![0_usize; n_classes];
    for &i in indices {
        counts[target[i]] += 1;
    }
    counts
}


/// Returns the label with the most rows.
/// Ties are broken toward the smallest label.
#[inline]
pub(super) fn majority(counts: &[usize]) -> Label {
    let mut best = 0;
    for (y, &c) in counts.iter().enumerate() {
        if c > counts[best] { best = y; }
    }
    best
}


/// Finds the `(feature, threshold)` pair among `features`
/// that maximizes the information gain over `parent`.
/// Candidate thresholds are the midpoints between consecutive
/// distinct values observed at `indices`.
///
/// Returns `None` if no split reduces the entropy.
/// Among equal gains, the earliest feature in `features` and
/// the smallest threshold win.
pub(super) fn best_split(
    dataset: &Dataset,
    indices: &[usize],
    features: &[usize],
    parent: &[usize],
) -> Option<(Splitter, f64)>
{
    let parent_entropy = entropy(parent);
    if parent_entropy <= 0f64 { return None; }

    let candidates = features.par_iter()
        .map(|&feature| {
            best_threshold(dataset, indices, feature, parent)
                .map(|(threshold, impurity)| {
                    let gain = parent_entropy - impurity;
                    (Splitter::new(feature, threshold), gain)
                })
        })
        .collect::<Vec<_>>();

    candidates.into_iter()
        .flatten()
        .fold(None, |best: Option<(Splitter, f64)>, (rule, gain)| {
            match best {
                Some((_, best_gain)) if gain <= best_gain => best,
                _ => Some((rule, gain)),
            }
        })
        .filter(|(_, gain)| *gain > GAIN_TOLERANCE)
}


/// Sweeps the sorted values of `feature` and returns the threshold
/// with the smallest weighted child entropy, with that entropy.
fn best_threshold(
    dataset: &Dataset,
    indices: &[usize],
    feature: usize,
    parent: &[usize],
) -> Option<(f64, f64)>
{
    let target = dataset.target();
    let mut pairs = indices.iter()
        .map(|&i| (dataset.row(i)[feature], target[i]))
        .collect::<Vec<_>>();
    pairs.sort_unstable();

    let n_total = pairs.len() as f64;
    let mut left = vec![0_usize; parent.len()];
    let mut right = parent.to_vec();

    let mut best: Option<(f64, f64)> = None;
    for k in 0..pairs.len().saturating_sub(1) {
        let (value, y) = pairs[k];
        left[y] += 1;
        right[y] -= 1;

        let next = pairs[k + 1].0;
        if value == next { continue; }

        let n_left = (k + 1) as f64;
        let n_right = n_total - n_left;
        let impurity = (n_left * entropy(&left) + n_right * entropy(&right))
            / n_total;

        if best.map_or(true, |(_, b)| impurity < b) {
            let threshold = (value as f64 + next as f64) / 2f64;
            best = Some((threshold, impurity));
        }
    }
    best
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_of_pure_and_balanced_nodes() {
        assert_eq!(entropy(&[5, 0]), 0f64);
        assert_eq!(entropy(&[0, 0]), 0f64);
        assert!((entropy(&[4, 4]) - 1f64).abs() < 1e-12);
    }

    #[test]
    fn majority_breaks_ties_toward_zero() {
        assert_eq!(majority(&[3, 3]), 0);
        assert_eq!(majority(&[2, 3]), 1);
        assert_eq!(majority(&[0, 0]), 0);
    }

    #[test]
    fn threshold_is_a_midpoint() {
        let mut dataset = Dataset::new(["x"], "y");
        for (x, y) in [(1, 0), (2, 0), (3, 0), (10, 1), (12, 1)] {
            dataset.push(vec![x], y).unwrap();
        }
        let indices = (0..5).collect::<Vec<_>>();
        let parent = distribution(&dataset, &indices, 2);

        let (rule, gain) = best_split(&dataset, &indices, &[0], &parent)
            .unwrap();
        assert_eq!(rule.feature, 0);
        assert_eq!(rule.threshold, 6.5);
        assert!((gain - entropy(&parent)).abs() < 1e-12);
    }

    #[test]
    fn constant_feature_gives_no_split() {
        let mut dataset = Dataset::new(["x"], "y");
        for y in [0, 1, 0, 1] {
            dataset.push(vec![7], y).unwrap();
        }
        let indices = (0..4).collect::<Vec<_>>();
        let parent = distribution(&dataset, &indices, 2);
        assert!(best_split(&dataset, &indices, &[0], &parent).is_none());
    }
}
