//! Language tag sets that gate lexicalization capabilities.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TermError;

/// A non-empty set of language tags, written as a comma-separated list
/// such as `"en,it"`.
///
/// Tags are trimmed and compared exactly; `"en"` and `"EN"` are different
/// tags. The set renders sorted, so `"it, en"` displays as `"en,it"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageSet(BTreeSet<String>);

impl LanguageSet {
    /// Returns `true` if every tag of `self` is also in `other`.
    pub fn is_subset(&self, other: &LanguageSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromStr for LanguageSet {
    type Err = TermError;

    fn from_str(list: &str) -> Result<Self, Self::Err> {
        let mut tags = BTreeSet::new();
        for tag in list.split(',') {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(TermError::InvalidLanguages(list.to_string()));
            }
            tags.insert(tag.to_string());
        }
        Ok(LanguageSet(tags))
    }
}

impl TryFrom<String> for LanguageSet {
    type Error = TermError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageSet> for String {
    fn from(value: LanguageSet) -> Self {
        value.to_string()
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(list: &str) -> LanguageSet {
        list.parse().unwrap()
    }

    #[test]
    fn test_parse_trims_and_sorts() {
        let set = langs(" it , en");
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "en,it");
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(langs("en,en").len(), 1);
    }

    #[test]
    fn test_empty_entries_are_rejected() {
        assert!("".parse::<LanguageSet>().is_err());
        assert!("en,,it".parse::<LanguageSet>().is_err());
        assert!("en,".parse::<LanguageSet>().is_err());
    }

    #[test]
    fn test_subset() {
        assert!(langs("en").is_subset(&langs("en,it")));
        assert!(langs("it,en").is_subset(&langs("en,it")));
        assert!(!langs("en,de").is_subset(&langs("en,it")));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!(!langs("EN").is_subset(&langs("en")));
    }
}
