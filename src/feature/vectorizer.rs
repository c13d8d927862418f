use chrono::DateTime;

use crate::record::{Record, Author};
use crate::similarity::SimilarityScorer;
use super::{
    vector::FeatureVector,
    association::{AssociationTable, SpamPolicy},
};


/// Maps a `(record, author, templates)` triple to a [`FeatureVector`].
///
/// The association table, the labeling policy, and the similarity scorer
/// are injected at construction; `vectorize` itself is a pure function.
///
/// # Example
/// ```no_run
/// use spamforest::prelude::*;
///
/// # fn inputs() -> (Record, Author, Vec<Template>) { unimplemented!() }
/// let (record, author, templates) = inputs();
/// let vectorizer = FeatureVectorizer::default()
///     .policy(SpamPolicy::verbatim());
/// let vector = vectorizer.vectorize(&record, &author, &templates);
/// println!("{vector:?}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorizer {
    associations: AssociationTable,
    policy: SpamPolicy,
    scorer: SimilarityScorer,
}


impl FeatureVectorizer {
    /// Construct a vectorizer from its collaborators.
    pub fn new(
        associations: AssociationTable,
        policy: SpamPolicy,
        scorer: SimilarityScorer,
    ) -> Self
    {
        Self { associations, policy, scorer }
    }


    /// Replace the association table.
    pub fn associations(mut self, associations: AssociationTable) -> Self {
        self.associations = associations;
        self
    }


    /// Replace the labeling policy.
    /// Default is [`SpamPolicy::default`].
    pub fn policy(mut self, policy: SpamPolicy) -> Self {
        self.policy = policy;
        self
    }


    /// Replace the similarity scorer.
    pub fn scorer(mut self, scorer: SimilarityScorer) -> Self {
        self.scorer = scorer;
        self
    }


    /// Returns the feature vector of `record`.
    /// An unparsable timestamp yields `age == 0`.
    pub fn vectorize<T>(
        &self,
        record: &Record,
        author: &Author,
        templates: &[T],
    ) -> FeatureVector
        where T: AsRef<str>
    {
        let association = self.associations.class_of(&record.association);
        let age = account_age_days(&record.created_at, &author.created_at)
            .unwrap_or(0);

        FeatureVector {
            association,
            contributions: author.contributions,
            repos:         author.repos,
            age,
            followers:     author.followers,
            following:     author.following,
            body_len:      record.body.chars().count() as u64,
            title_len:     record.title.chars().count() as u64,
            sim_score:     self.scorer.score(&record.body, templates),
            is_spam:       self.policy.label(association, record.is_spam),
        }
    }
}


/// Whole days between `account_created` and `record_created`,
/// both RFC 3339 timestamps.
/// Returns `None` if either fails to parse.
/// A record that predates the account (clock skew) gives `Some(0)`.
pub fn account_age_days(record_created: &str, account_created: &str)
    -> Option<u64>
{
    let record = DateTime::parse_from_rfc3339(record_created).ok()?;
    let account = DateTime::parse_from_rfc3339(account_created).ok()?;

    let days = record.signed_duration_since(account).num_days();
    Some(days.max(0) as u64)
}
