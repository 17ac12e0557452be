//! Matching goals against granted capabilities.
//!
//! A goal is allowed when some granted capability matches its topic under
//! one of the [`Rule`]s and grants at least the requested permission
//! letters. The rules are independent alternatives tried in order; the
//! first that fires wins. There is no negation, so anything that does not
//! match is denied.

use std::fmt;

use tracing::trace;

use crate::capability::Capability;
use crate::goal::Goal;
use crate::role::subsumes;
use crate::store::CapabilityStore;
use crate::topic::{Qualifier, Subject, Topic};

/// A way in which a granted topic can cover a requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The topics are identical.
    Direct,
    /// The grant is on the bare domain.
    DomainFallback,
    /// The granted subject is a wildcard or a generalization of the
    /// requested role.
    RoleSubsumption,
    /// The grant is on a vocabulary group containing the requested role.
    VocabularyGrouping,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Rule::Direct,
        Rule::DomainFallback,
        Rule::RoleSubsumption,
        Rule::VocabularyGrouping,
    ];

    /// Returns `true` if `granted` covers `requested` under this rule.
    pub fn matches(self, granted: &Topic, requested: &Topic) -> bool {
        match self {
            Rule::Direct => granted == requested,
            Rule::DomainFallback => match granted {
                Topic::Domain(domain) => *domain == requested.domain(),
                _ => false,
            },
            Rule::RoleSubsumption => {
                covers_scoped(granted, requested, |granted, requested| match (granted, requested) {
                    (Subject::Any, _) | (_, Subject::Any) => true,
                    (Subject::Role(general), Subject::Role(specific)) => {
                        subsumes(general, specific)
                    }
                    (Subject::Group(a), Subject::Group(b)) => a == b,
                    (Subject::Atom(a), Subject::Atom(b)) => a == b,
                    _ => false,
                })
            }
            Rule::VocabularyGrouping => {
                covers_scoped(granted, requested, |granted, requested| match (granted, requested) {
                    (Subject::Group(group), Subject::Role(role)) => group.contains(role),
                    _ => false,
                })
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Direct => "direct match",
            Rule::DomainFallback => "domain fallback",
            Rule::RoleSubsumption => "role subsumption",
            Rule::VocabularyGrouping => "vocabulary grouping",
        };
        f.write_str(name)
    }
}

/// Shared shape of the subject based rules: same domain, subject covered
/// by `subject_covers`, and scope covered.
fn covers_scoped(
    granted: &Topic,
    requested: &Topic,
    subject_covers: impl Fn(&Subject, &Subject) -> bool,
) -> bool {
    if granted.domain() != requested.domain() {
        return false;
    }
    let (Some(granted_subject), Some(requested_subject)) = (granted.subject(), requested.subject())
    else {
        return false;
    };
    subject_covers(granted_subject, requested_subject)
        && scope_covers(granted.qualifier(), requested.qualifier())
}

/// Whether a granted scope covers a requested one.
///
/// A grant without scope covers every scope; a scoped grant never covers an
/// unscoped request.
pub fn scope_covers(granted: Option<&Qualifier>, requested: Option<&Qualifier>) -> bool {
    match (granted, requested) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(granted), Some(requested)) => qualifier_covers(granted, requested),
    }
}

/// Whether a granted qualifier covers a requested one, including language
/// set coverage for lexicalizations.
pub fn qualifier_covers(granted: &Qualifier, requested: &Qualifier) -> bool {
    match (granted, requested) {
        (Qualifier::Any, _) | (_, Qualifier::Any) => true,
        (Qualifier::Lexicalization(None), Qualifier::Lexicalization(_)) => true,
        (Qualifier::Lexicalization(Some(granted)), Qualifier::Lexicalization(Some(requested))) => {
            requested.is_subset(granted)
        }
        (Qualifier::Atom(a), Qualifier::Atom(b)) => a == b,
        _ => false,
    }
}

/// Why a goal was allowed: the capability that matched and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Derivation<'a> {
    pub rule: Rule,
    pub capability: &'a Capability,
}

impl fmt::Display for Derivation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.capability.to_term(), self.rule)
    }
}

/// Finds the first capability in `store` that allows `goal`.
pub fn derive<'a>(goal: &Goal, store: &'a CapabilityStore) -> Option<Derivation<'a>> {
    for capability in store {
        if !goal.permissions.is_subset_of(&capability.permissions) {
            continue;
        }
        if let Some(rule) = Rule::ALL
            .into_iter()
            .find(|rule| rule.matches(&capability.topic, &goal.topic))
        {
            trace!(%goal, %capability, %rule, "Goal derived");
            return Some(Derivation { rule, capability });
        }
    }
    trace!(%goal, "No capability matches goal");
    None
}

/// Returns `true` if some capability in `store` allows `goal`.
pub fn evaluate(goal: &Goal, store: &CapabilityStore) -> bool {
    derive(goal, store).is_some()
}
