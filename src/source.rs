//! Where records, authors and templates come from.
//!
//! [`RecordSource`] is the seam between the classifier and whatever
//! fetches issues (an API client, a cache, a fixture).
//! [`JsonSource`] is an offline snapshot of such a source,
//! stored as three JSON files in one directory:
//! - `records.json`: an array of records, each with a `repository` field,
//! - `authors.json`: an array of author profiles,
//! - `templates.json`: an object mapping `owner/name` to template bodies.
//!   This file is optional.
use serde::{Serialize, Deserialize};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::SpamError;
use crate::error::Result;
use crate::record::{Author, Record, Repository, Template};


/// File name of the records of a [`JsonSource`].
pub const RECORDS_FILE: &str = "records.json";
/// File name of the authors of a [`JsonSource`].
pub const AUTHORS_FILE: &str = "authors.json";
/// File name of the templates of a [`JsonSource`].
pub const TEMPLATES_FILE: &str = "templates.json";


/// Which records of a repository to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Records flagged as spam upstream.
    Spam,
    /// Records not flagged as spam.
    NonSpam,
    /// Every record.
    All,
}


/// A query for [`RecordSource::records`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    /// The repository the records belong to.
    pub repository: Repository,
    /// Which records to return.
    pub kind: RecordKind,
}


impl RecordFilter {
    /// All records of `repository`.
    pub fn all(repository: &Repository) -> Self {
        Self { repository: repository.clone(), kind: RecordKind::All }
    }


    /// The records of `repository` flagged as spam.
    pub fn spam(repository: &Repository) -> Self {
        Self { repository: repository.clone(), kind: RecordKind::Spam }
    }


    /// The records of `repository` not flagged as spam.
    pub fn non_spam(repository: &Repository) -> Self {
        Self { repository: repository.clone(), kind: RecordKind::NonSpam }
    }


    /// Returns `true` if `record` of `repository` passes the filter.
    pub fn matches(&self, repository: &Repository, record: &Record) -> bool {
        if *repository != self.repository {
            return false;
        }
        match self.kind {
            RecordKind::Spam => record.is_spam,
            RecordKind::NonSpam => !record.is_spam,
            RecordKind::All => true,
        }
    }
}


/// A provider of records, author profiles and templates.
///
/// Retries, pagination and timeouts are the implementor's business;
/// callers only see the returned snapshots or an error.
pub trait RecordSource {
    /// Records selected by `filter`.
    fn records(&self, filter: &RecordFilter) -> Result<Vec<Record>>;

    /// The profile of the account `login`.
    fn author(&self, login: &str) -> Result<Author>;

    /// The issue templates of `repository`, possibly none.
    fn templates(&self, repository: &Repository) -> Result<Vec<Template>>;

    /// Record `number` of `repository`.
    fn record(&self, repository: &Repository, number: u64) -> Result<Record>;
}


#[derive(Serialize, Deserialize)]
struct StoredRecord {
    repository: Repository,
    #[serde(flatten)]
    record: Record,
}


/// A [`RecordSource`] backed by an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct JsonSource {
    records: Vec<(Repository, Record)>,
    authors: HashMap<String, Author>,
    templates: HashMap<Repository, Vec<Template>>,
}


impl JsonSource {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }


    /// Load the snapshot stored in `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let records: Vec<StoredRecord> = read_json(dir.join(RECORDS_FILE))?;
        let authors: Vec<Author> = read_json(dir.join(AUTHORS_FILE))?;
        let templates: HashMap<Repository, Vec<Template>> =
            match read_json(dir.join(TEMPLATES_FILE)) {
                Err(SpamError::NotFound { .. }) => HashMap::new(),
                result => result?,
            };

        let records = records.into_iter()
            .map(|stored| (stored.repository, stored.record))
            .collect();
        let authors = authors.into_iter()
            .map(|author| (author.login.clone(), author))
            .collect();

        Ok(Self { records, authors, templates })
    }


    /// Write the snapshot to `dir`, which must exist.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();

        let records = self.records.iter()
            .map(|(repository, record)| StoredRecord {
                repository: repository.clone(),
                record: record.clone(),
            })
            .collect::<Vec<_>>();
        let mut authors = self.authors.values().collect::<Vec<_>>();
        authors.sort_by(|a, b| a.login.cmp(&b.login));

        write_json(dir.join(RECORDS_FILE), &records)?;
        write_json(dir.join(AUTHORS_FILE), &authors)?;
        write_json(dir.join(TEMPLATES_FILE), &self.templates)
    }


    /// Add a record of `repository`.
    pub fn with_record(mut self, repository: &Repository, record: Record)
        -> Self
    {
        self.records.push((repository.clone(), record));
        self
    }


    /// Add or replace an author profile.
    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.insert(author.login.clone(), author);
        self
    }


    /// Add templates of `repository`.
    pub fn with_templates<I, T>(mut self, repository: &Repository, templates: I)
        -> Self
        where I: IntoIterator<Item = T>,
              T: Into<Template>,
    {
        self.templates.entry(repository.clone())
            .or_default()
            .extend(templates.into_iter().map(Into::into));
        self
    }
}


impl RecordSource for JsonSource {
    fn records(&self, filter: &RecordFilter) -> Result<Vec<Record>> {
        let records = self.records.iter()
            .filter(|(repository, record)| filter.matches(repository, record))
            .map(|(_, record)| record.clone())
            .collect();
        Ok(records)
    }


    fn author(&self, login: &str) -> Result<Author> {
        self.authors.get(login)
            .cloned()
            .ok_or_else(|| SpamError::NotFound {
                what: format!("author `{login}`"),
            })
    }


    fn templates(&self, repository: &Repository) -> Result<Vec<Template>> {
        Ok(self.templates.get(repository).cloned().unwrap_or_default())
    }


    fn record(&self, repository: &Repository, number: u64) -> Result<Record> {
        self.records.iter()
            .find(|(r, record)| r == repository && record.number == number)
            .map(|(_, record)| record.clone())
            .ok_or_else(|| SpamError::NotFound {
                what: format!("record #{number} of {repository}"),
            })
    }
}


fn read_json<T, P>(path: P) -> Result<T>
    where T: for<'de> Deserialize<'de>,
          P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SpamError::io(e, path))?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}


fn write_json<T, P>(path: P, value: &T) -> Result<()>
    where T: Serialize,
          P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SpamError::io(e, path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|e| SpamError::io(e, path))
}
