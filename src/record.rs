//! Inputs handed over by a [`RecordSource`](crate::source::RecordSource).
//! These are read-only snapshots; nothing in this crate mutates them.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::error::SpamError;


/// A repository, written `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Repository {
    /// Account that owns the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
}


impl Repository {
    /// Construct a new `Repository`.
    pub fn new<S: ToString, T: ToString>(owner: S, name: T) -> Self {
        Self { owner: owner.to_string(), name: name.to_string() }
    }


    /// The `owner-name` stem used for dataset and model file names.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.owner, self.name)
    }
}


impl FromStr for Repository {
    type Err = SpamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split('/').collect::<Vec<_>>()[..] {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            },
            _ => Err(SpamError::InvalidParameter(
                format!("invalid repository `{s}`, expected `owner/name`")
            )),
        }
    }
}


impl TryFrom<String> for Repository {
    type Error = SpamError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}


impl From<Repository> for String {
    fn from(repository: Repository) -> Self {
        repository.to_string()
    }
}


impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}


/// An issue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Issue number within its repository.
    pub number: u64,
    /// Title text.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Login of the author.
    pub author: String,
    /// Author's relationship to the repository,
    /// e.g. `NONE`, `FIRST_TIMER`, `CONTRIBUTOR`, `OWNER`.
    pub association: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// `true` if an upstream moderator flagged the record as spam.
    #[serde(default)]
    pub is_spam: bool,
}


/// An author profile snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Account login.
    pub login: String,
    /// RFC 3339 account creation timestamp.
    pub created_at: String,
    /// Profile bio, possibly empty.
    #[serde(default)]
    pub bio: String,
    /// Follower count.
    pub followers: u64,
    /// Following count.
    pub following: u64,
    /// Contributions in the last year.
    pub contributions: u64,
    /// Number of distinct repositories contributed to.
    pub repos: u64,
}


/// The body of an issue template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(pub String);


impl AsRef<str> for Template {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


impl From<&str> for Template {
    fn from(body: &str) -> Self {
        Self(body.to_string())
    }
}


impl From<String> for Template {
    fn from(body: String) -> Self {
        Self(body)
    }
}
