use rand::prelude::*;

use crate::SpamError;
use crate::error::Result;
use super::dataset::Dataset;


impl Dataset {
    /// Shuffle the rows with a seeded RNG and split them into
    /// a training set and a test set holding `test_ratio` of the rows.
    /// Both parts keep at least one row.
    ///
    /// # Example
    /// ```no_run
    /// use spamforest::Dataset;
    /// let dataset = Dataset::read_csv("cli-cli.csv").unwrap();
    /// let (train, test) = dataset.train_test_split(0.2, 1234).unwrap();
    /// ```
    pub fn train_test_split(&self, test_ratio: f64, seed: u64)
        -> Result<(Dataset, Dataset)>
    {
        if !(0f64 < test_ratio && test_ratio < 1f64) {
            return Err(SpamError::InvalidParameter(
                format!("test ratio must be in (0, 1), got {test_ratio}")
            ));
        }
        let n_sample = self.len();
        if n_sample < 2 {
            return Err(SpamError::InvalidParameter(
                format!("cannot split a dataset of {n_sample} row(s)")
            ));
        }

        let mut ix = (0..n_sample).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        ix.shuffle(&mut rng);

        let test_size = ((n_sample as f64 * test_ratio).round() as usize)
            .clamp(1, n_sample - 1);
        let (test, train) = ix.split_at(test_size);

        Ok((self.subset(train), self.subset(test)))
    }
}
