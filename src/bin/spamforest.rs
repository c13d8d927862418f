use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use spamforest::prelude::*;
use spamforest::logging;


/// Spam classifier for issue reports.
#[derive(Parser)]
#[command(name = "spamforest", version, about)]
struct Cli {
    /// Repository, as `owner/name`.
    #[arg(short = 'R', long, global = true)]
    repo: Option<Repository>,

    /// Directory holding the records/authors/templates snapshot.
    #[arg(short, long, global = true, default_value = ".")]
    source: PathBuf,

    /// Keep upstream spam flags of contributors and members.
    #[arg(long, global = true)]
    verbatim_labels: bool,

    #[command(subcommand)]
    command: Command,
}


#[derive(Subcommand)]
enum Command {
    /// Build the dataset of the repository and write it as CSV.
    Build {
        /// Output file. Default is `<owner>-<name>.csv`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Train a forest and save it.
    Train {
        /// Dataset file. Built from the source if it does not exist.
        /// Default is `<owner>-<name>.csv`.
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Hyperparameters as JSON.
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Number of trees, overriding `--params`.
        #[arg(short = 'n', long)]
        trees: Option<usize>,

        /// Seed, overriding `--params`.
        #[arg(long)]
        seed: Option<u64>,

        /// Fraction of the rows held out for evaluation.
        /// By default the model is evaluated on its training data.
        #[arg(short, long)]
        test_ratio: Option<f64>,

        /// Write one CSV line per tree to this file.
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output model. Default is `<owner>-<name>.model`.
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Classify one record.
    Classify {
        /// Record number.
        number: u64,

        /// Model file. Default is `<owner>-<name>.model`.
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
}


fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}


fn run() -> Result<()> {
    let cli = Cli::parse();
    let repository = cli.repo.clone()
        .context("no repository given, use `--repo owner/name`")?;

    let mut vectorizer = FeatureVectorizer::default();
    if cli.verbatim_labels {
        vectorizer = vectorizer.policy(SpamPolicy::verbatim());
    }

    match &cli.command {
        Command::Build { output } => {
            let output = output.clone()
                .unwrap_or_else(|| default_path(&repository, "csv"));
            build(&cli.source, &repository, &vectorizer, &output)?;
        },
        Command::Train {
            data, params, trees, seed, test_ratio, log, model,
        } => {
            let data = data.clone()
                .unwrap_or_else(|| default_path(&repository, "csv"));
            let dataset = if data.exists() {
                logging::info(format!("Reading {}", data.display()));
                Dataset::read_csv(&data)?
            } else {
                build(&cli.source, &repository, &vectorizer, &data)?
            };

            let mut params = match params {
                Some(path) => ForestParams::from_json_file(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => ForestParams::default(),
            };
            if let Some(n) = trees { params.n_trees = *n; }
            if let Some(s) = seed { params.seed = *s; }

            let model = model.clone()
                .unwrap_or_else(|| default_path(&repository, "model"));
            train(&dataset, params, *test_ratio, log.as_deref(), &model)?;
        },
        Command::Classify { number, model } => {
            let model = model.clone()
                .unwrap_or_else(|| default_path(&repository, "model"));
            classify(&cli.source, &repository, *number, &vectorizer, &model)?;
        },
    }
    Ok(())
}


fn default_path(repository: &Repository, extension: &str) -> PathBuf {
    PathBuf::from(format!("{}.{extension}", repository.file_stem()))
}


fn build(
    source: &Path,
    repository: &Repository,
    vectorizer: &FeatureVectorizer,
    output: &Path,
) -> Result<Dataset>
{
    let source = JsonSource::open(source)
        .with_context(|| format!("opening snapshot {}", source.display()))?;
    let dataset = build_dataset(&source, repository, vectorizer)?;
    dataset.write_csv(output)?;
    logging::info(format!(
        "Wrote {} rows to {}",
        dataset.len(),
        output.display(),
    ));
    Ok(dataset)
}


fn train(
    dataset: &Dataset,
    params: ForestParams,
    test_ratio: Option<f64>,
    log: Option<&Path>,
    output: &Path,
) -> Result<()>
{
    let (train, test) = match test_ratio {
        Some(ratio) => dataset.train_test_split(ratio, params.seed)?,
        None => (dataset.clone(), dataset.clone()),
    };

    let forest = RandomForestBuilder::new(&train)
        .params(params)
        .build()?;

    let mut logger = Logger::new(&forest);
    if let Some(path) = log {
        logger = logger.csv(path);
    }
    let model = logger.run()?;

    let predictions = model.predict_batch(&test)?;
    let matrix = ConfusionMatrix::new(&test, &predictions)?;
    println!("{matrix}\n");
    println!("{}", matrix.summary());
    if let Some(oob) = model.oob_error() {
        println!("Out-of-bag error: {oob:.4}");
    }

    model.save(output)?;
    logging::info(format!("Saved model to {}", output.display()));
    Ok(())
}


fn classify(
    source: &Path,
    repository: &Repository,
    number: u64,
    vectorizer: &FeatureVectorizer,
    model: &Path,
) -> Result<()>
{
    let model = RandomForestClassifier::load(model)
        .with_context(|| format!("loading {}", model.display()))?;
    let source = JsonSource::open(source)
        .with_context(|| format!("opening snapshot {}", source.display()))?;

    let verdict = classify_record(
        &source, repository, number, vectorizer, &model,
    )?;

    let label = if verdict.is_spam() {
        "SPAM".bold().red()
    } else {
        "NOT SPAM".bold().green()
    };
    println!(
        "#{} {:?} by {}: {label} ({:.1}% of {} trees)",
        verdict.record.number,
        verdict.record.title,
        verdict.record.author,
        verdict.votes.confidence * 100.0,
        model.trees().len(),
    );
    Ok(())
}
