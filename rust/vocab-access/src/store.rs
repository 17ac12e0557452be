//! The set of capabilities granted to the current principal.

use crate::capability::Capability;
use crate::error::ParseError;

/// Granted capabilities, in the order they were supplied.
///
/// A store is immutable once built; the authorizer replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityStore {
    capabilities: Vec<Capability>,
}

impl CapabilityStore {
    /// Builds a store from already typed capabilities.
    pub fn load(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Parses textual capability entries.
    ///
    /// Each entry may hold any number of facts, each terminated by `.`. The
    /// first malformed entry or fact aborts the whole load.
    ///
    /// # Example
    ///
    /// ```
    /// use vocab_access::CapabilityStore;
    ///
    /// let store = CapabilityStore::parse([
    ///     r#"capability(rdf(concept), "CRUD")."#,
    ///     r#"capability(rdf(lexicalization("en")), "C")."#,
    /// ])
    /// .unwrap();
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn parse<I, S>(entries: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut capabilities = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            let document = vocab_terms::parse(entry).map_err(|source| ParseError::Syntax {
                entry: entry.to_string(),
                source,
            })?;
            for fact in &document.facts {
                capabilities.push(Capability::try_from(fact)?);
            }
        }
        Ok(Self { capabilities })
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Capability> {
        self.capabilities.iter()
    }
}

impl<'a> IntoIterator for &'a CapabilityStore {
    type Item = &'a Capability;
    type IntoIter = std::slice::Iter<'a, Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Capability> for CapabilityStore {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        CapabilityStore::load(iter)
    }
}
