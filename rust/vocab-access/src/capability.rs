//! Granted capabilities: `capability(Topic, "Letters").`

use std::fmt;

use vocab_terms::{Fact, Term};

use crate::error::{ParseError, TermError};
use crate::permission::Permissions;
use crate::topic::Topic;

/// A single granted capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capability {
    pub topic: Topic,
    pub permissions: Permissions,
}

impl Capability {
    pub fn new(topic: Topic, permissions: Permissions) -> Self {
        Self { topic, permissions }
    }

    pub fn to_term(&self) -> Term {
        Term::compound(
            "capability",
            vec![self.topic.to_term(), Term::string(self.permissions.to_string())],
        )
    }
}

impl TryFrom<&Term> for Capability {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        match (term.functor(), term.args()) {
            (Some("capability"), [topic, Term::Str(letters)]) => Ok(Capability {
                topic: Topic::try_from(topic)?,
                permissions: letters.parse()?,
            }),
            _ => Err(TermError::NotACapability {
                found: term.to_string(),
            }),
        }
    }
}

impl TryFrom<&Fact> for Capability {
    type Error = ParseError;

    fn try_from(fact: &Fact) -> Result<Self, Self::Error> {
        Capability::try_from(&fact.term).map_err(|reason| ParseError::Malformed {
            fact: fact.to_string(),
            reason,
        })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.", self.to_term())
    }
}
