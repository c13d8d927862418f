//! Wiring a [`RecordSource`] to the vectorizer and the model.
use std::collections::HashMap;

use crate::{Dataset, SpamError};
use crate::error::Result;
use crate::feature::{FeatureVector, FeatureVectorizer, N_FEATURES};
use crate::feature::account_age_days;
use crate::forest::{RandomForestClassifier, Votes};
use crate::logging;
use crate::record::{Author, Record, Repository};
use crate::source::{RecordFilter, RecordSource};

/// Progress is reported every this many records.
const PROGRESS_EVERY: usize = 20;


/// Author profiles fetched during one batch,
/// so each login hits the source once.
#[derive(Debug, Clone, Default)]
pub struct AuthorCache {
    authors: HashMap<String, Author>,
    fetches: usize,
}


impl AuthorCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }


    /// Returns the profile of `login`,
    /// fetching it from `source` on the first request.
    /// Failed fetches are not cached.
    pub fn get_or_fetch<S>(&mut self, source: &S, login: &str)
        -> Result<&Author>
        where S: RecordSource + ?Sized
    {
        if !self.authors.contains_key(login) {
            self.fetches += 1;
            let author = source.author(login)?;
            self.authors.insert(login.to_string(), author);
        }
        self.authors.get(login)
            .ok_or_else(|| SpamError::NotFound {
                what: format!("author `{login}`"),
            })
    }


    /// Number of cached profiles.
    pub fn len(&self) -> usize {
        self.authors.len()
    }


    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }


    /// Number of requests sent to the source.
    pub fn fetches(&self) -> usize {
        self.fetches
    }
}


/// Build the dataset of `repository`.
///
/// Non-spam and spam records are fetched separately,
/// the latter are flagged, and all are vectorized in record-number order.
/// Records whose author cannot be fetched are skipped with a warning.
/// Authors are cached for the duration of this call.
pub fn build_dataset<S>(
    source: &S,
    repository: &Repository,
    vectorizer: &FeatureVectorizer,
) -> Result<Dataset>
    where S: RecordSource + ?Sized
{
    let mut cache = AuthorCache::new();
    build_dataset_with_cache(source, repository, vectorizer, &mut cache)
}


/// [`build_dataset`] with a caller-owned author cache.
pub fn build_dataset_with_cache<S>(
    source: &S,
    repository: &Repository,
    vectorizer: &FeatureVectorizer,
    cache: &mut AuthorCache,
) -> Result<Dataset>
    where S: RecordSource + ?Sized
{
    logging::info(format!("Fetching records of {repository}"));
    let records = fetch_records(source, repository)?;
    let templates = source.templates(repository)?;
    logging::info(format!(
        "Fetched {} records and {} templates",
        records.len(),
        templates.len(),
    ));

    let n_records = records.len();
    let mut dataset = Dataset::default();
    for (i, record) in records.iter().enumerate() {
        match cache.get_or_fetch(source, &record.author) {
            Ok(author) => {
                warn_on_bad_timestamps(record, author);
                let vector = vectorizer.vectorize(record, author, &templates);
                dataset.push_vector(&vector)?;
            },
            Err(e) => {
                logging::warn(format!(
                    "skipping record #{}: cannot fetch author `{}`: {e}",
                    record.number, record.author,
                ));
            },
        }

        if i % PROGRESS_EVERY == PROGRESS_EVERY - 1 {
            logging::info(format!("{}/{n_records} processed", i + 1));
        }
    }

    Ok(dataset)
}


/// The non-spam and the spam records of `repository`,
/// the latter flagged, sorted by record number.
fn fetch_records<S>(source: &S, repository: &Repository)
    -> Result<Vec<Record>>
    where S: RecordSource + ?Sized
{
    let mut records = source.records(&RecordFilter::non_spam(repository))?;
    let spam = source.records(&RecordFilter::spam(repository))?;
    logging::info(format!("{} spam records", spam.len()));

    records.extend(spam.into_iter().map(|record| Record {
        is_spam: true,
        ..record
    }));
    records.sort_by_key(|record| record.number);
    Ok(records)
}


fn warn_on_bad_timestamps(record: &Record, author: &Author) {
    if account_age_days(&record.created_at, &author.created_at).is_none() {
        logging::warn(format!(
            "record #{}: unparsable timestamp ({:?} or {:?}), age set to 0",
            record.number, record.created_at, author.created_at,
        ));
    }
}


/// The verdict on one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// The classified record.
    pub record: Record,
    /// Its feature vector.
    /// The label is the one the policy derives from upstream flags.
    pub vector: FeatureVector,
    /// The vote breakdown of the model.
    pub votes: Votes,
}


impl Classification {
    /// Returns `true` if the model predicts spam.
    pub fn is_spam(&self) -> bool {
        self.votes.label == 1
    }
}


/// Fetch record `number` of `repository`, its author and the
/// repository templates, then classify it with `model`.
pub fn classify_record<S>(
    source: &S,
    repository: &Repository,
    number: u64,
    vectorizer: &FeatureVectorizer,
    model: &RandomForestClassifier,
) -> Result<Classification>
    where S: RecordSource + ?Sized
{
    if model.n_feature() != N_FEATURES {
        return Err(SpamError::InvalidFeatureVector {
            expected: model.n_feature(),
            found: N_FEATURES,
        });
    }

    let record = source.record(repository, number)?;
    let author = source.author(&record.author)?;
    let templates = source.templates(repository)?;

    warn_on_bad_timestamps(&record, &author);
    let vector = vectorizer.vectorize(&record, &author, &templates);
    let votes = model.predict_with_votes(&vector.features());

    Ok(Classification { record, vector, votes })
}
