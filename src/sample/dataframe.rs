use polars::prelude::*;

use crate::SpamError;
use crate::error::Result;
use super::dataset::{check_label, Dataset};


impl Dataset {
    /// Convert a `polars::DataFrame` into `Dataset`.
    /// Every column is cast to `u64`;
    /// the column named `target` becomes the label.
    pub fn from_dataframe(data: &DataFrame, target: &str) -> Result<Self> {
        let n_sample = data.height();

        let mut features = Vec::with_capacity(data.width());
        let mut labels = None;
        for series in data.get_columns() {
            let name = series.name().to_string();
            let values = series.cast(&DataType::UInt64)?
                .u64()?
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| SpamError::InvalidParameter(
                    format!("column `{name}` has null or negative values")
                ))?;

            if name == target {
                labels = Some(values);
            } else {
                features.push((name, values));
            }
        }
        let labels = labels.ok_or_else(|| SpamError::InvalidParameter(
            format!("the target column `{target}` does not exist")
        ))?;

        let names = features.iter().map(|(name, _)| name.clone());
        let mut dataset = Dataset::new(names, target);
        for i in 0..n_sample {
            let row = features.iter()
                .map(|(_, values)| values[i])
                .collect::<Vec<_>>();
            dataset.push(row, check_label(labels[i])?)?;
        }
        Ok(dataset)
    }


    /// Convert `self` into a `polars::DataFrame`, label column last.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = self.feature_names.iter()
            .enumerate()
            .map(|(j, name)| {
                let values = self.rows.iter()
                    .map(|row| row[j])
                    .collect::<Vec<u64>>();
                Series::new(name.as_str(), values)
            })
            .collect::<Vec<_>>();

        let target = self.target.iter()
            .map(|&y| y as u64)
            .collect::<Vec<u64>>();
        columns.push(Series::new(self.target_name.as_str(), target));

        Ok(DataFrame::new(columns)?)
    }
}
