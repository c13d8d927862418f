//! Console and CSV logging.
use colored::Colorize;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::SpamError;
use crate::error::Result;
use crate::forest::{RandomForest, RandomForestClassifier, TreeReport};

const DEFAULT_PRINT_EVERY: usize = 10;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Tree,Nodes,Leaves,Depth,InBag,OobError,Time\n";


/// Print an informational message to stdout.
pub fn info<T: fmt::Display>(message: T) {
    println!("{} {message}", "[INFO]".bold().cyan());
}


/// Print a warning to stderr.
pub fn warn<T: fmt::Display>(message: T) {
    eprintln!("{} {message}", "[WARN]".bold().yellow());
}


/// `Logger` trains a [`RandomForest`] and reports every tree:
/// a STATS banner, a `[LOG]` line every `print_every` trees,
/// a `[FIN]` line, and optionally one CSV line per tree.
///
/// ```no_run
/// use spamforest::prelude::*;
///
/// let dataset = Dataset::read_csv("rust-lang-rust.csv").unwrap();
/// let forest = RandomForestBuilder::new(&dataset).build().unwrap();
/// let model = Logger::new(&forest)
///     .print_every(5)
///     .csv("trees.csv")
///     .run()
///     .unwrap();
/// ```
pub struct Logger<'a, 'b> {
    forest: &'b RandomForest<'a>,
    round: usize,
    csv: Option<PathBuf>,
}


impl<'a, 'b> Logger<'a, 'b> {
    /// Create a new instance of `Logger`.
    pub fn new(forest: &'b RandomForest<'a>) -> Self {
        Self { forest, round: DEFAULT_PRINT_EVERY, csv: None }
    }


    /// Set the interval to print the current status.
    /// By default, `run` prints its status every `10` trees.
    /// If you don't want to print the log, set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }


    /// Also write one line per tree to the CSV file `path`.
    pub fn csv<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.csv = Some(path.as_ref().to_path_buf());
        self
    }


    #[inline(always)]
    fn quiet(&self) -> bool {
        self.round == usize::MAX
    }


    /// print current settings.
    fn print_stats(&self) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Learner".bold(),
            self.forest.name().bold().green(),
        );

        let line = self.forest.info()
            .into_iter()
            .map(|(key, val)| {
                format!(
                    "    + {:<STAT_WIDTH$}\t{:>width$}",
                    key,
                    val.bold().yellow(),
                    width = STAT_WIDTH - 8
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        println!("{line}\n{:=^FULL_WIDTH$}\n", "".bold());
    }


    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "".bold().blue(),
            "".bold().green(),
            "OOB".bold().yellow(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "TREE".bold().red(),
            "NODES".bold().blue(),
            "DEPTH".bold().green(),
            "ERROR".bold().yellow(),
            "TIME".bold().cyan(),
        );
    }


    /// Train the forest with logging.
    /// Running time is accumulated over the trees in tree order.
    pub fn run(&self) -> Result<RandomForestClassifier> {
        let mut file = match &self.csv {
            Some(path) => {
                let file = File::create(path)
                    .map_err(|e| SpamError::io(e, path))?;
                let mut file = BufWriter::new(file);
                file.write_all(HEADER.as_bytes())
                    .map_err(|e| SpamError::io(e, path))?;
                Some((file, path))
            },
            None => None,
        };

        if !self.quiet() {
            self.print_stats();
            self.print_log_header();
        }

        let reports = self.forest.fit_trees()?;

        let mut time_acc = 0;
        for report in &reports {
            time_acc += report.time;
            let tree = report.index + 1;

            if let Some((file, path)) = file.as_mut() {
                file.write_all(csv_line(report).as_bytes())
                    .map_err(|e| SpamError::io(e, path))?;
            }

            if !self.quiet() && tree % self.round == 0 {
                println!(
                    "{} {}\t{}\t{}\t{}\t{}",
                    "[LOG]".bold().magenta(),
                    format!("{:>WIDTH$}", tree).red(),
                    format!("{:>WIDTH$}", report.tree.n_nodes()).blue(),
                    format!("{:>WIDTH$}", report.tree.depth()).green(),
                    oob_format(report.oob_error).yellow(),
                    time_format(time_acc).bold().cyan(),
                );
            }
        }

        if let Some((file, path)) = file.as_mut() {
            file.flush().map_err(|e| SpamError::io(e, path))?;
        }

        let f = self.forest.assemble(reports);
        if !self.quiet() {
            println!(
                "{} {}\t{}\t{}\t{}\t{}\n",
                "[FIN]".bold().bright_green(),
                format!("{:>WIDTH$}", f.trees().len()).red(),
                format!("{:>WIDTH$}", "").blue(),
                format!("{:>WIDTH$}", "").green(),
                oob_format(f.oob_error()).bold().yellow(),
                time_format(time_acc).bold().cyan(),
            );
        }
        Ok(f)
    }
}


fn csv_line(report: &TreeReport) -> String {
    let oob = report.oob_error
        .map(|e| e.to_string())
        .unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{}\n",
        report.index + 1,
        report.tree.n_nodes(),
        report.tree.n_leaves(),
        report.tree.depth(),
        report.in_bag.count_ones(..),
        oob,
        report.time,
    )
}


fn oob_format(error: Option<f64>) -> String {
    match error {
        Some(e) => format!("{:>WIDTH$.PREC_WIDTH$}", e),
        None => format!("{:>WIDTH$}", "-"),
    }
}


/// Format milliseconds for the console log.
pub(crate) fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_is_formatted_by_magnitude() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(3_500), " 03.500s");
        assert_eq!(time_format(125_000), " 02m 05s");
        assert_eq!(time_format(7_260_000), " 02h 01m");
    }
}
