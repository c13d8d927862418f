use serde::{Serialize, Deserialize};

use std::collections::HashMap;

use crate::Label;


/// The ordinal class of `CONTRIBUTOR`.
/// Classes at or above this tier are established contributors.
pub const CONTRIBUTOR_TIER: u64 = 3;


/// Immutable mapping from association category to its ordinal class.
/// Categories missing from the table map to `default_class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationTable {
    classes: HashMap<String, u64>,
    default_class: u64,
}


impl Default for AssociationTable {
    /// ```text
    /// NONE, FIRST_TIMER       -> 0
    /// FIRST_TIME_CONTRIBUTOR  -> 1
    /// COLLABORATOR            -> 2
    /// CONTRIBUTOR             -> 3
    /// MEMBER, OWNER           -> 4
    /// (anything else)         -> 0
    /// ```
    fn default() -> Self {
        let classes = [
            ("NONE",                   0),
            ("FIRST_TIMER",            0),
            ("FIRST_TIME_CONTRIBUTOR", 1),
            ("COLLABORATOR",           2),
            ("CONTRIBUTOR",            CONTRIBUTOR_TIER),
            ("MEMBER",                 4),
            ("OWNER",                  4),
        ]
        .into_iter()
        .map(|(name, class)| (name.to_string(), class))
        .collect();

        Self { classes, default_class: 0 }
    }
}


impl AssociationTable {
    /// Construct a table from `(category, class)` pairs.
    pub fn from_pairs<I, S>(pairs: I, default_class: u64) -> Self
        where I: IntoIterator<Item = (S, u64)>,
              S: ToString,
    {
        let classes = pairs.into_iter()
            .map(|(name, class)| (name.to_string(), class))
            .collect();
        Self { classes, default_class }
    }


    /// Returns the class of `category`.
    /// The lookup is case-insensitive.
    pub fn class_of(&self, category: &str) -> u64 {
        self.classes.get(category)
            .or_else(|| self.classes.get(&category.to_ascii_uppercase()))
            .copied()
            .unwrap_or(self.default_class)
    }
}


/// The rule that turns an upstream spam flag into a training label.
///
/// With `trust_contributors` on, records whose author is at or above
/// `contributor_tier` are labeled non-spam even when flagged upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpamPolicy {
    /// Whether established contributors are always labeled non-spam.
    pub trust_contributors: bool,
    /// The lowest association class regarded as established.
    pub contributor_tier: u64,
}


impl Default for SpamPolicy {
    fn default() -> Self {
        Self { trust_contributors: true, contributor_tier: CONTRIBUTOR_TIER }
    }
}


impl SpamPolicy {
    /// A policy that copies the upstream flag verbatim.
    pub fn verbatim() -> Self {
        Self { trust_contributors: false, ..Self::default() }
    }


    /// Returns the label of a record of association class `association`
    /// that was (or was not) `flagged` upstream.
    pub fn label(&self, association: u64, flagged: bool) -> Label {
        if !flagged {
            return 0;
        }
        if self.trust_contributors && association >= self.contributor_tier {
            return 0;
        }
        1
    }
}
