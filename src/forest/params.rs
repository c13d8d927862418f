use serde::{Serialize, Deserialize};

use std::path::Path;
use std::fs::File;
use std::io::BufReader;

use crate::SpamError;
use crate::error::Result;
use crate::tree::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_LEAF_SIZE, MAX_TREE_DEPTH};


/// The number of trees set as default.
pub const DEFAULT_N_TREES: usize = 70;
/// The seed set as default.
pub const DEFAULT_SEED: u64 = 42;


/// Forest hyperparameters as configured by the user.
/// Every field has a default, so a JSON file only needs the ones it changes:
/// ```json
/// { "n_trees": 64, "max_depth": 12 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Number of trees.
    pub n_trees: usize,
    /// Candidate features per split.
    /// `None` means all feature columns but one.
    pub max_features: Option<usize>,
    /// Maximal depth of each tree.
    pub max_depth: usize,
    /// Nodes with fewer rows than this become leaves.
    pub min_leaf_size: usize,
    /// Seed of the bootstrap and feature sampling.
    pub seed: u64,
}


impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            max_features: None,
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}


impl ForestParams {
    /// Read parameters from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SpamError::io(e, path))?;
        let params = serde_json::from_reader(BufReader::new(file))?;
        Ok(params)
    }


    /// Resolve the parameters against a dataset of `n_feature` columns.
    pub fn resolve(&self, n_feature: usize) -> Result<Hyperparameters> {
        if self.n_trees == 0 {
            return Err(SpamError::InvalidParameter(
                "the forest needs at least one tree".into()
            ));
        }
        if self.max_depth > MAX_TREE_DEPTH {
            return Err(SpamError::InvalidParameter(format!(
                "max_depth = {} exceeds the limit of {MAX_TREE_DEPTH}",
                self.max_depth
            )));
        }
        let max_features = self.max_features
            .unwrap_or(n_feature.saturating_sub(1))
            .max(1);
        if n_feature > 0 && max_features > n_feature {
            return Err(SpamError::InvalidParameter(format!(
                "max_features = {max_features} exceeds \
                 the number of features ({n_feature})"
            )));
        }

        Ok(Hyperparameters {
            n_trees: self.n_trees,
            max_features: max_features.min(n_feature.max(1)),
            max_depth: self.max_depth,
            min_leaf_size: self.min_leaf_size,
            seed: self.seed,
        })
    }
}


/// The hyperparameters a forest was actually trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// Number of trees.
    pub n_trees: usize,
    /// Candidate features per split.
    pub max_features: usize,
    /// Maximal depth of each tree.
    pub max_depth: usize,
    /// Nodes with fewer rows than this become leaves.
    pub min_leaf_size: usize,
    /// Seed of the bootstrap and feature sampling.
    pub seed: u64,
}
