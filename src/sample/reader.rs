use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use crate::SpamError;
use crate::error::Result;
use crate::feature::TARGET_NAME;
use super::dataset::{check_label, Dataset};


/// A struct that reads a CSV file into [`Dataset`].
///
/// The file starts with a header row of column names
/// followed by one comma-separated integer row per example.
///
/// # Example
/// ```no_run
/// use spamforest::DatasetReader;
/// let dataset = DatasetReader::default()
///     .file("cli-cli.csv")
///     .target_feature("is_spam")
///     .read()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DatasetReader<P> {
    file: Option<P>,
    target: String,
}


impl<P> Default for DatasetReader<P> {
    fn default() -> Self {
        Self { file: None, target: TARGET_NAME.to_string() }
    }
}


impl<P> DatasetReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Set the column name that is used for the label.
    /// Default is `"is_spam"`.
    pub fn target_feature<S: ToString>(mut self, column: S) -> Self {
        self.target = column.to_string();
        self
    }


    /// Reads the file based on the arguments.
    /// This method consumes `self`.
    pub fn read(self) -> Result<Dataset> {
        let file = self.file.ok_or_else(|| {
            SpamError::InvalidParameter("the dataset file is not set".into())
        })?;
        let path = file.as_ref();
        let handle = File::open(path).map_err(|e| SpamError::io(e, path))?;

        Dataset::from_reader(BufReader::new(handle), &self.target)
    }
}


impl Dataset {
    /// Read a CSV file whose label column is `is_spam`.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        DatasetReader::default()
            .file(path)
            .read()
    }


    /// Parse CSV text from `reader`.
    /// `target` names the label column; it may be at any position.
    pub fn from_reader<R: BufRead>(reader: R, target: &str) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let header = match lines.next() {
            Some((_, line)) => line.map_err(|e| SpamError::io(e, "<reader>"))?,
            None => {
                return Err(SpamError::Parse {
                    line: 1,
                    reason: "missing header row".into(),
                });
            },
        };
        let columns = header.split(',')
            .map(|name| name.trim().to_string())
            .collect::<Vec<_>>();
        let target_pos = columns.iter()
            .position(|name| name == target)
            .ok_or_else(|| SpamError::Parse {
                line: 1,
                reason: format!("the target column `{target}` does not exist"),
            })?;

        let feature_names = columns.iter()
            .enumerate()
            .filter_map(|(i, name)| (i != target_pos).then_some(name));
        let mut dataset = Dataset::new(feature_names, target);

        for (i, line) in lines {
            let line = line.map_err(|e| SpamError::io(e, "<reader>"))?;
            let lineno = i + 1;
            if line.trim().is_empty() { continue; }

            let values = line.split(',')
                .map(|x| x.trim().parse::<u64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| SpamError::Parse {
                    line: lineno,
                    reason: e.to_string(),
                })?;

            if values.len() != columns.len() {
                return Err(SpamError::Parse {
                    line: lineno,
                    reason: format!(
                        "expected {} columns, found {}",
                        columns.len(), values.len()
                    ),
                });
            }

            let label = check_label(values[target_pos])
                .map_err(|e| SpamError::Parse {
                    line: lineno,
                    reason: e.to_string(),
                })?;
            let row = values.into_iter()
                .enumerate()
                .filter_map(|(j, x)| (j != target_pos).then_some(x))
                .collect::<Vec<_>>();
            dataset.push(row, label)?;
        }

        Ok(dataset)
    }


    /// Write `self` as CSV to `path`, label column last.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SpamError::io(e, path))?;
        let mut writer = BufWriter::new(file);

        self.to_writer(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| SpamError::io(e, path))
    }


    /// Write `self` as CSV to `writer`, label column last.
    pub fn to_writer<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", self.header().join(","))?;

        for (x, y) in self.iter() {
            let line = x.iter()
                .map(|v| v.to_string())
                .chain(std::iter::once(y.to_string()))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}
