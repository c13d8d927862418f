use fixedbitset::FixedBitSet;
use rand::prelude::*;
use rayon::prelude::*;

use std::fmt;
use std::time::Instant;

use crate::{Classifier, Dataset, SpamError, TrainWarning};
use crate::error::Result;
use crate::logging;
use crate::tree::{DecisionTree, DecisionTreeClassifier};
use super::{
    params::Hyperparameters,
    rf_classifier::{RandomForestClassifier, majority_vote},
};


/// The random forest algorithm.
///
/// Each tree is grown on its own bootstrap sample
/// (rows drawn with replacement, as many as the dataset has)
/// with a random subset of the feature columns considered at each split.
/// Trees only share the read-only dataset, so they are trained
/// on the `rayon` thread pool and collected in tree order.
/// The per-tree seeds are drawn up front from `StdRng::seed_from_u64(seed)`,
/// so the forest depends only on the seed and the data,
/// and forests of neighbouring seeds share no tree.
///
/// [`RandomForest`] is constructed
/// by [`RandomForestBuilder`](crate::forest::RandomForestBuilder).
pub struct RandomForest<'a> {
    dataset: &'a Dataset,
    tree: DecisionTree,
    hyper: Hyperparameters,
    parallel: bool,
}


/// The outcome of training one tree.
#[derive(Debug, Clone)]
pub struct TreeReport {
    /// Position of the tree in the forest.
    pub index: usize,
    /// The trained tree.
    pub tree: DecisionTreeClassifier,
    /// Rows drawn at least once by the bootstrap.
    pub in_bag: FixedBitSet,
    /// Error rate of the tree on the rows it did not see.
    /// `None` if every row was drawn.
    pub oob_error: Option<f64>,
    /// Training time in milliseconds.
    pub time: u128,
}


impl<'a> RandomForest<'a> {
    /// Initialize [`RandomForest`].
    /// This method is called only via `RandomForestBuilder::build`.
    #[inline]
    pub(super) fn new(
        dataset: &'a Dataset,
        tree: DecisionTree,
        hyper: Hyperparameters,
        parallel: bool,
    ) -> Self
    {
        Self { dataset, tree, hyper, parallel }
    }


    /// Returns the name of the algorithm.
    pub fn name(&self) -> &str {
        "Random Forest"
    }


    /// Returns the hyperparameters as `(key, value)` pairs for display.
    pub fn info(&self) -> Vec<(&str, String)> {
        let (n_sample, n_feature) = self.dataset.shape();
        Vec::from([
            ("# of examples", format!("{n_sample}")),
            ("# of features", format!("{n_feature}")),
            ("# of trees", format!("{}", self.hyper.n_trees)),
            ("Features per split", format!("{}", self.hyper.max_features)),
            ("Max depth", format!("{}", self.hyper.max_depth)),
            ("Min leaf size", format!("{}", self.hyper.min_leaf_size)),
            ("Seed", format!("{}", self.hyper.seed)),
        ])
    }


    /// The resolved hyperparameters.
    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyper
    }


    /// Train the forest.
    ///
    /// Fails with [`SpamError::EmptyDataset`] if the dataset has no rows.
    /// A dataset with a single label value trains normally
    /// and a [`TrainWarning::SingleClass`] is logged.
    pub fn fit(&self) -> Result<RandomForestClassifier> {
        let reports = self.fit_trees()?;
        Ok(self.assemble(reports))
    }


    /// Train every tree and return the per-tree reports in tree order.
    pub fn fit_trees(&self) -> Result<Vec<TreeReport>> {
        if self.dataset.is_empty() {
            return Err(SpamError::EmptyDataset);
        }
        if let Some(warning) = Self::check_labels(self.dataset) {
            logging::warn(&warning);
        }

        let seeds = self.tree_seeds();
        if self.parallel {
            seeds.into_par_iter()
                .enumerate()
                .map(|(t, seed)| self.fit_tree(t, seed))
                .collect()
        } else {
            seeds.into_iter()
                .enumerate()
                .map(|(t, seed)| self.fit_tree(t, seed))
                .collect()
        }
    }


    /// One seed per tree, in tree order.
    fn tree_seeds(&self) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(self.hyper.seed);
        (0..self.hyper.n_trees).map(|_| rng.gen()).collect()
    }


    /// Combine the per-tree reports into the trained forest.
    pub fn assemble(&self, reports: Vec<TreeReport>) -> RandomForestClassifier {
        let n_classes = self.dataset.n_classes();
        let oob_error = out_of_bag_error(self.dataset, &reports[..], n_classes);

        let trees = reports.into_iter()
            .map(|report| report.tree)
            .collect::<Vec<_>>();

        let hyper = Hyperparameters { n_trees: trees.len(), ..self.hyper };
        RandomForestClassifier::from_parts(
            hyper,
            trees,
            self.dataset.shape().1,
            n_classes,
            oob_error,
        )
    }


    /// Returns a warning if only one label value occurs in `dataset`.
    pub fn check_labels(dataset: &Dataset) -> Option<TrainWarning> {
        match dataset.distinct_labels()[..] {
            [(label, _)] => Some(TrainWarning::SingleClass { label }),
            _ => None,
        }
    }


    /// Draw the bootstrap sample of tree `t` and grow the tree.
    fn fit_tree(&self, t: usize, seed: u64) -> Result<TreeReport> {
        let now = Instant::now();
        let mut rng = StdRng::seed_from_u64(seed);

        let n_sample = self.dataset.len();
        let indices = (0..n_sample)
            .map(|_| rng.gen_range(0..n_sample))
            .collect::<Vec<_>>();

        let mut in_bag = FixedBitSet::with_capacity(n_sample);
        indices.iter().for_each(|&i| in_bag.insert(i));

        let tree = self.tree.fit(self.dataset, &indices[..], &mut rng)?;

        let (wrong, total) = (0..n_sample)
            .filter(|&i| !in_bag.contains(i))
            .fold((0_usize, 0_usize), |(wrong, total), i| {
                let (x, y) = self.dataset.at(i);
                (wrong + usize::from(tree.predict(x) != y), total + 1)
            });
        let oob_error = (total > 0).then(|| wrong as f64 / total as f64);

        Ok(TreeReport {
            index: t,
            tree,
            in_bag,
            oob_error,
            time: now.elapsed().as_millis(),
        })
    }
}


/// Error rate of the forest on each row, voting only with the trees
/// whose bootstrap sample missed that row.
/// `None` if no row was missed by any tree.
fn out_of_bag_error(
    dataset: &Dataset,
    reports: &[TreeReport],
    n_classes: usize,
) -> Option<f64>
{
    let (wrong, total) = dataset.iter()
        .enumerate()
        .filter_map(|(i, (x, y))| {
            let mut votes = vec![0_usize; n_classes];
            let mut n_votes = 0_usize;
            for report in reports.iter().filter(|r| !r.in_bag.contains(i)) {
                let p = report.tree.predict(x);
                if p < n_classes {
                    votes[p] += 1;
                    n_votes += 1;
                }
            }
            (n_votes > 0).then(|| majority_vote(&votes[..]) != y)
        })
        .fold((0_usize, 0_usize), |(wrong, total), miss| {
            (wrong + usize::from(miss), total + 1)
        });

    (total > 0).then(|| wrong as f64 / total as f64)
}


impl fmt::Display for RandomForest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------\n# {}\n", self.name())?;
        for (key, value) in self.info() {
            writeln!(f, "- {key}: {value}")?;
        }
        write!(f, "----------")
    }
}
