//! Capability topics: `domain`, `domain(Subject)` and
//! `domain(Subject, Scope)`.
//!
//! Topics appear both in granted capabilities and in the goals derived from
//! actions. They are read from [`Term`]s and rendered back as terms, so a
//! topic's `Display` is the text that would appear inside a capability fact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vocab_terms::Term;

use crate::error::TermError;
use crate::language::LanguageSet;
use crate::role::{Role, VocabularyGroup};

/// The administrative area a topic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// The edited data itself.
    Rdf,
    /// Role based access control administration.
    Rbac,
    /// Custom forms.
    Cform,
    /// Project management.
    Pm,
    /// User management.
    Um,
    /// System settings.
    Sys,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Rdf,
        Domain::Rbac,
        Domain::Cform,
        Domain::Pm,
        Domain::Um,
        Domain::Sys,
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            Domain::Rdf => "rdf",
            Domain::Rbac => "rbac",
            Domain::Cform => "cform",
            Domain::Pm => "pm",
            Domain::Um => "um",
            Domain::Sys => "sys",
        }
    }
}

impl FromStr for Domain {
    type Err = TermError;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|domain| domain.identifier() == identifier)
            .ok_or_else(|| TermError::UnknownDomain(identifier.to_string()))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// What a topic is about within its domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    /// A resource role such as `concept` or `xLabel("en")`.
    Role(Role),
    /// A vocabulary group such as `skos`.
    Group(VocabularyGroup),
    /// Any other atom, e.g. `project`, `form` or `sparql`. Atoms only match
    /// themselves.
    Atom(String),
    /// The wildcard `_`.
    Any,
}

impl Subject {
    pub fn atom(name: impl Into<String>) -> Self {
        Subject::Atom(name.into())
    }

    pub fn role(&self) -> Option<&Role> {
        match self {
            Subject::Role(role) => Some(role),
            _ => None,
        }
    }

    pub fn to_term(&self) -> Term {
        match self {
            Subject::Role(role) => role.to_term(),
            Subject::Group(group) => Term::atom(group.identifier()),
            Subject::Atom(name) => Term::atom(name.clone()),
            Subject::Any => Term::wildcard(),
        }
    }
}

impl From<Role> for Subject {
    fn from(role: Role) -> Self {
        Subject::Role(role)
    }
}

impl From<VocabularyGroup> for Subject {
    fn from(group: VocabularyGroup) -> Self {
        Subject::Group(group)
    }
}

impl TryFrom<&Term> for Subject {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        match term {
            Term::Var(_) => Ok(Subject::Any),
            Term::Atom(name) => Ok(if let Some(role) = Role::from_identifier(name) {
                Subject::Role(role)
            } else if let Some(group) = VocabularyGroup::from_identifier(name) {
                Subject::Group(group)
            } else {
                Subject::Atom(name.clone())
            }),
            Term::Compound { .. } => Role::try_from(term).map(Subject::Role),
            Term::Str(_) => Err(TermError::Unsupported {
                position: "subject",
                term: term.to_string(),
            }),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term())
    }
}

/// The scope a topic is restricted to within its subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `lexicalization`, optionally restricted to a set of languages.
    Lexicalization(Option<LanguageSet>),
    /// Any other scope atom, e.g. `taxonomy`, `notes` or `alignment`.
    Atom(String),
    /// The wildcard `_`.
    Any,
}

impl Qualifier {
    pub fn atom(name: impl Into<String>) -> Self {
        Qualifier::Atom(name.into())
    }

    pub fn to_term(&self) -> Term {
        match self {
            Qualifier::Lexicalization(None) => Term::atom("lexicalization"),
            Qualifier::Lexicalization(Some(languages)) => {
                Term::compound("lexicalization", vec![Term::string(languages.to_string())])
            }
            Qualifier::Atom(name) => Term::atom(name.clone()),
            Qualifier::Any => Term::wildcard(),
        }
    }

    fn is_lexicalization(term: &Term) -> bool {
        term.functor() == Some("lexicalization")
    }
}

impl TryFrom<&Term> for Qualifier {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        let unsupported = || TermError::Unsupported {
            position: "scope",
            term: term.to_string(),
        };
        match term {
            Term::Var(_) => Ok(Qualifier::Any),
            Term::Atom(name) if name == "lexicalization" => Ok(Qualifier::Lexicalization(None)),
            Term::Atom(name) => Ok(Qualifier::Atom(name.clone())),
            Term::Compound { functor, args } if functor == "lexicalization" => {
                match args.as_slice() {
                    [Term::Str(list)] => Ok(Qualifier::Lexicalization(Some(list.parse()?))),
                    _ => Err(unsupported()),
                }
            }
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term())
    }
}

/// A capability topic.
///
/// The subject type is generic so that action templates can carry a
/// placeholder for the role of the resource being acted upon; see
/// [`Slot`](crate::Slot).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic<S = Subject> {
    /// `rdf`: everything in the domain.
    Domain(Domain),
    /// `rdf(concept)`
    Subject { domain: Domain, subject: S },
    /// `rdf(concept, lexicalization("en"))`
    Scoped {
        domain: Domain,
        subject: S,
        qualifier: Qualifier,
    },
}

impl<S> Topic<S> {
    pub fn domain(&self) -> Domain {
        match self {
            Topic::Domain(domain)
            | Topic::Subject { domain, .. }
            | Topic::Scoped { domain, .. } => *domain,
        }
    }

    pub fn subject(&self) -> Option<&S> {
        match self {
            Topic::Domain(_) => None,
            Topic::Subject { subject, .. } | Topic::Scoped { subject, .. } => Some(subject),
        }
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        match self {
            Topic::Scoped { qualifier, .. } => Some(qualifier),
            _ => None,
        }
    }

    /// Rewrites the subject, leaving domain and scope untouched.
    pub fn try_map_subject<T, E>(self, f: impl FnOnce(S) -> Result<T, E>) -> Result<Topic<T>, E> {
        Ok(match self {
            Topic::Domain(domain) => Topic::Domain(domain),
            Topic::Subject { domain, subject } => Topic::Subject {
                domain,
                subject: f(subject)?,
            },
            Topic::Scoped {
                domain,
                subject,
                qualifier,
            } => Topic::Scoped {
                domain,
                subject: f(subject)?,
                qualifier,
            },
        })
    }
}

impl Topic {
    pub fn to_term(&self) -> Term {
        let domain = self.domain().identifier();
        match self {
            Topic::Domain(_) => Term::atom(domain),
            Topic::Subject { subject, .. } => Term::compound(domain, vec![subject.to_term()]),
            Topic::Scoped {
                subject, qualifier, ..
            } => Term::compound(domain, vec![subject.to_term(), qualifier.to_term()]),
        }
    }
}

impl TryFrom<&Term> for Topic {
    type Error = TermError;

    /// Reads a topic term.
    ///
    /// `rdf(lexicalization(...))` is shorthand for
    /// `rdf(resource, lexicalization(...))`.
    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        let Some(functor) = term.functor() else {
            return Err(TermError::Unsupported {
                position: "topic",
                term: term.to_string(),
            });
        };
        let domain: Domain = functor.parse()?;
        match term.args() {
            [] => Ok(Topic::Domain(domain)),
            [scope] if Qualifier::is_lexicalization(scope) => Ok(Topic::Scoped {
                domain,
                subject: Subject::Role(Role::Resource),
                qualifier: Qualifier::try_from(scope)?,
            }),
            [subject] => Ok(Topic::Subject {
                domain,
                subject: Subject::try_from(subject)?,
            }),
            [subject, scope] => Ok(Topic::Scoped {
                domain,
                subject: Subject::try_from(subject)?,
                qualifier: Qualifier::try_from(scope)?,
            }),
            _ => Err(TermError::Unsupported {
                position: "topic",
                term: term.to_string(),
            }),
        }
    }
}

impl FromStr for Topic {
    type Err = crate::error::ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let term =
            vocab_terms::parse_term(input).map_err(|source| crate::error::ParseError::Syntax {
                entry: input.to_string(),
                source,
            })?;
        Topic::try_from(&term).map_err(|reason| crate::error::ParseError::Malformed {
            fact: term.to_string(),
            reason,
        })
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term())
    }
}
