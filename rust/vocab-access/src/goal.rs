//! Goal templates and the goals they resolve to.
//!
//! A [`GoalTemplate`] is what an action asks for, possibly with a hole for
//! the role of the resource being acted upon. Filling that hole yields a
//! [`Goal`], the only thing the evaluator and the decision cache ever see.

use std::fmt;

use vocab_terms::Term;

use crate::error::AuthError;
use crate::language::LanguageSet;
use crate::permission::Permissions;
use crate::role::{Role, VocabularyGroup};
use crate::topic::{Domain, Qualifier, Subject, Topic};

/// The subject position of a goal template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A subject fixed by the action itself.
    Bound(Subject),
    /// Filled with the role of the resource at query time.
    ResourceRole,
}

impl Slot {
    fn to_term(&self) -> Term {
        match self {
            Slot::Bound(subject) => subject.to_term(),
            Slot::ResourceRole => Term::Var("ResourceRole".into()),
        }
    }
}

impl From<Subject> for Slot {
    fn from(subject: Subject) -> Self {
        Slot::Bound(subject)
    }
}

impl From<Role> for Slot {
    fn from(role: Role) -> Self {
        Slot::Bound(Subject::Role(role))
    }
}

impl From<VocabularyGroup> for Slot {
    fn from(group: VocabularyGroup) -> Self {
        Slot::Bound(Subject::Group(group))
    }
}

/// A requested capability with an optional role placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoalTemplate {
    pub topic: Topic<Slot>,
    pub permissions: Permissions,
}

impl GoalTemplate {
    /// `domain`, e.g. `rdf "R"`.
    pub fn domain(domain: Domain, permissions: Permissions) -> Self {
        Self {
            topic: Topic::Domain(domain),
            permissions,
        }
    }

    /// `domain(subject)`; use [`Slot::ResourceRole`] for a role-dependent
    /// goal.
    pub fn subject(domain: Domain, subject: impl Into<Slot>, permissions: Permissions) -> Self {
        Self {
            topic: Topic::Subject {
                domain,
                subject: subject.into(),
            },
            permissions,
        }
    }

    /// `domain(subject, qualifier)`.
    pub fn scoped(
        domain: Domain,
        subject: impl Into<Slot>,
        qualifier: Qualifier,
        permissions: Permissions,
    ) -> Self {
        Self {
            topic: Topic::Scoped {
                domain,
                subject: subject.into(),
                qualifier,
            },
            permissions,
        }
    }

    /// Returns `true` if resolving this template needs a resource role.
    pub fn needs_resource_role(&self) -> bool {
        matches!(self.topic.subject(), Some(Slot::ResourceRole))
    }

    /// Binds the role placeholder.
    ///
    /// A template without a placeholder resolves to itself whatever `role`
    /// is; a template with one fails with
    /// [`AuthError::MissingResourceRole`] when `role` is `None`.
    pub fn resolve(&self, role: Option<&Role>) -> Result<Goal, AuthError> {
        let topic = self.topic.clone().try_map_subject(|slot| match slot {
            Slot::Bound(subject) => Ok(subject),
            Slot::ResourceRole => match role {
                Some(role) => Ok(Subject::Role(role.clone())),
                None => Err(AuthError::MissingResourceRole {
                    action: None,
                    goal: self.to_string(),
                }),
            },
        })?;
        Ok(Goal {
            topic,
            permissions: self.permissions,
        })
    }
}

impl fmt::Display for GoalTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domain = self.topic.domain().identifier();
        let topic = match &self.topic {
            Topic::Domain(_) => Term::atom(domain),
            Topic::Subject { subject, .. } => Term::compound(domain, vec![subject.to_term()]),
            Topic::Scoped {
                subject, qualifier, ..
            } => Term::compound(domain, vec![subject.to_term(), qualifier.to_term()]),
        };
        let term = Term::compound(
            "capability",
            vec![topic, Term::string(self.permissions.to_string())],
        );
        write!(f, "{term}")
    }
}

/// A fully resolved goal. Used as the decision cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Goal {
    pub topic: Topic,
    pub permissions: Permissions,
}

impl Goal {
    pub fn new(topic: Topic, permissions: Permissions) -> Self {
        Self { topic, permissions }
    }

    /// Narrows an ungated language requirement to `languages`.
    ///
    /// Applies to a `lexicalization` scope and to an `xLabel` subject; any
    /// other goal, or one already gated on languages, is returned unchanged.
    pub fn with_languages(self, languages: &LanguageSet) -> Goal {
        let narrow_subject = |subject: Subject| match subject {
            Subject::Role(Role::XLabel(None)) => {
                Subject::Role(Role::XLabel(Some(languages.clone())))
            }
            other => other,
        };
        let topic = match self.topic {
            Topic::Domain(domain) => Topic::Domain(domain),
            Topic::Subject { domain, subject } => Topic::Subject {
                domain,
                subject: narrow_subject(subject),
            },
            Topic::Scoped {
                domain,
                subject,
                qualifier,
            } => Topic::Scoped {
                domain,
                subject: narrow_subject(subject),
                qualifier: match qualifier {
                    Qualifier::Lexicalization(None) => {
                        Qualifier::Lexicalization(Some(languages.clone()))
                    }
                    other => other,
                },
            },
        };
        Goal {
            topic,
            permissions: self.permissions,
        }
    }

    pub fn to_term(&self) -> Term {
        Term::compound(
            "capability",
            vec![self.topic.to_term(), Term::string(self.permissions.to_string())],
        )
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn langs(list: &str) -> LanguageSet {
        list.parse().unwrap()
    }

    #[test]
    fn test_fixed_template_ignores_role() {
        let template = GoalTemplate::subject(Domain::Rdf, Role::Concept, Permissions::C);
        assert!(!template.needs_resource_role());
        let without = template.resolve(None).unwrap();
        let with = template.resolve(Some(&Role::Cls)).unwrap();
        assert_eq!(without, with);
        assert_eq!(without.to_string(), r#"capability(rdf(concept), "C")"#);
    }

    #[test]
    fn test_placeholder_is_bound() {
        let template = GoalTemplate::scoped(
            Domain::Rdf,
            Slot::ResourceRole,
            Qualifier::atom("alignment"),
            Permissions::C,
        );
        assert!(template.needs_resource_role());
        let goal = template.resolve(Some(&Role::ObjectProperty)).unwrap();
        assert_eq!(
            goal.to_string(),
            r#"capability(rdf(objectProperty, alignment), "C")"#
        );
    }

    #[test]
    fn test_missing_role() {
        let template = GoalTemplate::subject(Domain::Rdf, Slot::ResourceRole, Permissions::R);
        assert_eq!(
            template.resolve(None),
            Err(AuthError::MissingResourceRole {
                action: None,
                goal: r#"capability(rdf(ResourceRole), "R")"#.into(),
            })
        );
    }

    #[test]
    fn test_with_languages_narrows_lexicalization() {
        let goal = GoalTemplate::scoped(
            Domain::Rdf,
            Slot::ResourceRole,
            Qualifier::Lexicalization(None),
            Permissions::C,
        )
        .resolve(Some(&Role::Concept))
        .unwrap()
        .with_languages(&langs("fr,en"));
        assert_eq!(
            goal.to_string(),
            r#"capability(rdf(concept, lexicalization("en,fr")), "C")"#
        );
    }

    #[test]
    fn test_with_languages_narrows_xlabel() {
        let goal = Goal::new(
            Topic::Subject {
                domain: Domain::Rdf,
                subject: Subject::Role(Role::XLabel(None)),
            },
            Permissions::U,
        )
        .with_languages(&langs("it"));
        assert_eq!(goal.to_string(), r#"capability(rdf(xLabel("it")), "U")"#);
    }

    #[test]
    fn test_with_languages_keeps_other_goals() {
        let goal = Goal::new(Topic::Domain(Domain::Rdf), Permissions::R);
        assert_eq!(goal.clone().with_languages(&langs("en")), goal);

        let gated = Goal::new(
            Topic::Scoped {
                domain: Domain::Rdf,
                subject: Subject::Role(Role::Resource),
                qualifier: Qualifier::Lexicalization(Some(langs("it"))),
            },
            Permissions::C,
        );
        assert_eq!(gated.clone().with_languages(&langs("en")), gated);
    }
}
