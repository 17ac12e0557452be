//! Resource roles and the subsumption taxonomy between them.
//!
//! The taxonomy is a tree rooted at [`Role::Resource`]:
//!
//! ```text
//! resource
//! ├── property
//! │   ├── objectProperty
//! │   ├── datatypeProperty
//! │   ├── annotationProperty
//! │   └── ontologyProperty
//! ├── skosCollection
//! │   └── skosOrderedCollection
//! ├── xLabel
//! │   └── xLabel("en,it")   (and every other language-gated xLabel)
//! └── cls, individual, concept, conceptScheme, ontology, dataRange
//! ```
//!
//! A language-gated `xLabel(G)` additionally subsumes `xLabel(L)` whenever
//! `L` is a subset of `G`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vocab_terms::Term;

use crate::error::TermError;
use crate::language::LanguageSet;

/// The kind of a resource in the data being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Cls,
    Individual,
    Property,
    ObjectProperty,
    DatatypeProperty,
    AnnotationProperty,
    OntologyProperty,
    Concept,
    ConceptScheme,
    SkosCollection,
    SkosOrderedCollection,
    /// A reified label, optionally restricted to a set of languages.
    XLabel(Option<LanguageSet>),
    Ontology,
    DataRange,
    /// The top of the taxonomy.
    Resource,
}

impl Role {
    /// Roles that can be named by a bare identifier.
    pub const NAMED: [Role; 15] = [
        Role::Cls,
        Role::Individual,
        Role::Property,
        Role::ObjectProperty,
        Role::DatatypeProperty,
        Role::AnnotationProperty,
        Role::OntologyProperty,
        Role::Concept,
        Role::ConceptScheme,
        Role::SkosCollection,
        Role::SkosOrderedCollection,
        Role::XLabel(None),
        Role::Ontology,
        Role::DataRange,
        Role::Resource,
    ];

    /// The identifier used for this role in capability facts.
    pub fn identifier(&self) -> &'static str {
        match self {
            Role::Cls => "cls",
            Role::Individual => "individual",
            Role::Property => "property",
            Role::ObjectProperty => "objectProperty",
            Role::DatatypeProperty => "datatypeProperty",
            Role::AnnotationProperty => "annotationProperty",
            Role::OntologyProperty => "ontologyProperty",
            Role::Concept => "concept",
            Role::ConceptScheme => "conceptScheme",
            Role::SkosCollection => "skosCollection",
            Role::SkosOrderedCollection => "skosOrderedCollection",
            Role::XLabel(_) => "xLabel",
            Role::Ontology => "ontology",
            Role::DataRange => "dataRange",
            Role::Resource => "resource",
        }
    }

    /// Looks up a role by its bare identifier.
    pub fn from_identifier(identifier: &str) -> Option<Role> {
        Role::NAMED
            .into_iter()
            .find(|role| role.identifier() == identifier)
    }

    /// The direct generalization of this role, `None` only for
    /// [`Role::Resource`].
    pub fn parent(&self) -> Option<Role> {
        match self {
            Role::Resource => None,
            Role::ObjectProperty
            | Role::DatatypeProperty
            | Role::AnnotationProperty
            | Role::OntologyProperty => Some(Role::Property),
            Role::SkosOrderedCollection => Some(Role::SkosCollection),
            Role::XLabel(Some(_)) => Some(Role::XLabel(None)),
            _ => Some(Role::Resource),
        }
    }

    /// This role followed by each of its generalizations up to
    /// [`Role::Resource`].
    pub fn ancestry(&self) -> impl Iterator<Item = Role> {
        std::iter::successors(Some(self.clone()), Role::parent)
    }

    /// Returns `true` if this role is one of the property roles.
    pub fn is_property(&self) -> bool {
        subsumes(&Role::Property, self)
    }

    /// The languages an `xLabel` role is restricted to, if any.
    pub fn languages(&self) -> Option<&LanguageSet> {
        match self {
            Role::XLabel(languages) => languages.as_ref(),
            _ => None,
        }
    }

    pub fn to_term(&self) -> Term {
        match self {
            Role::XLabel(Some(languages)) => {
                Term::compound("xLabel", vec![Term::string(languages.to_string())])
            }
            other => Term::atom(other.identifier()),
        }
    }
}

/// Returns `true` if a capability stated for `general` also covers
/// `specific`.
///
/// Subsumption is reflexive and transitive, and [`Role::Resource`] subsumes
/// every role.
pub fn subsumes(general: &Role, specific: &Role) -> bool {
    if let (Some(granted), Some(requested)) = (general.languages(), specific.languages()) {
        return requested.is_subset(granted);
    }
    specific.ancestry().any(|role| role == *general)
}

impl TryFrom<&Term> for Role {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        match term {
            Term::Atom(name) => {
                Role::from_identifier(name).ok_or_else(|| TermError::UnknownRole(name.clone()))
            }
            Term::Compound { functor, args } if functor == "xLabel" => match args.as_slice() {
                [Term::Str(list)] => Ok(Role::XLabel(Some(list.parse()?))),
                _ => Err(TermError::UnknownRole(term.to_string())),
            },
            other => Err(TermError::UnknownRole(other.to_string())),
        }
    }
}

impl FromStr for Role {
    type Err = TermError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let term =
            vocab_terms::parse_term(input).map_err(|_| TermError::UnknownRole(input.into()))?;
        Role::try_from(&term)
    }
}

impl TryFrom<String> for Role {
    type Error = TermError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term())
    }
}

/// A named family of roles that can be granted as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyGroup {
    /// Concepts, concept schemes and collections.
    Skos,
}

impl VocabularyGroup {
    pub fn identifier(self) -> &'static str {
        match self {
            VocabularyGroup::Skos => "skos",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "skos" => Some(VocabularyGroup::Skos),
            _ => None,
        }
    }

    /// Returns `true` if `role` belongs to this group.
    pub fn contains(self, role: &Role) -> bool {
        vocabulary_group(role) == Some(self)
    }
}

impl fmt::Display for VocabularyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// The vocabulary group a role belongs to, if any.
///
/// Membership is inherited, so `skosOrderedCollection` is in the `skos`
/// group through `skosCollection`.
pub fn vocabulary_group(role: &Role) -> Option<VocabularyGroup> {
    role.ancestry().find_map(|role| match role {
        Role::Concept | Role::ConceptScheme | Role::SkosCollection => Some(VocabularyGroup::Skos),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn xlabel(list: &str) -> Role {
        Role::XLabel(Some(list.parse().unwrap()))
    }

    #[test]
    fn test_identifiers_roundtrip() {
        for role in Role::NAMED {
            assert_eq!(Role::from_identifier(role.identifier()), Some(role.clone()));
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            "conept".parse::<Role>(),
            Err(TermError::UnknownRole("conept".into()))
        );
    }

    #[test]
    fn test_parse_language_gated_xlabel() {
        let role: Role = r#"xLabel("it, en")"#.parse().unwrap();
        assert_eq!(role, xlabel("en,it"));
        assert_eq!(role.to_string(), r#"xLabel("en,it")"#);
    }

    #[test]
    fn test_property_subroles() {
        for role in [
            Role::ObjectProperty,
            Role::DatatypeProperty,
            Role::AnnotationProperty,
            Role::OntologyProperty,
        ] {
            assert!(subsumes(&Role::Property, &role));
            assert!(!subsumes(&role, &Role::Property));
            assert!(role.is_property());
        }
        assert!(!subsumes(&Role::ObjectProperty, &Role::DatatypeProperty));
    }

    #[test]
    fn test_resource_subsumes_everything() {
        for role in Role::NAMED {
            assert!(subsumes(&Role::Resource, &role));
        }
        assert!(subsumes(&Role::Resource, &xlabel("en")));
    }

    #[test]
    fn test_ordered_collection_is_a_collection() {
        assert!(subsumes(&Role::SkosCollection, &Role::SkosOrderedCollection));
        assert!(!subsumes(&Role::SkosOrderedCollection, &Role::SkosCollection));
    }

    #[test]
    fn test_xlabel_language_subsumption() {
        assert!(subsumes(&Role::XLabel(None), &xlabel("en")));
        assert!(subsumes(&xlabel("en,it"), &xlabel("en")));
        assert!(!subsumes(&xlabel("en"), &xlabel("en,it")));
        assert!(!subsumes(&xlabel("en"), &Role::XLabel(None)));
    }

    #[test]
    fn test_unrelated_roles() {
        assert!(!subsumes(&Role::Concept, &Role::Cls));
        assert!(!subsumes(&Role::Cls, &Role::Resource));
    }

    #[test]
    fn test_ancestry() {
        let chain: Vec<Role> = Role::SkosOrderedCollection.ancestry().collect();
        assert_eq!(
            chain,
            vec![
                Role::SkosOrderedCollection,
                Role::SkosCollection,
                Role::Resource
            ]
        );
    }

    #[test]
    fn test_vocabulary_group() {
        assert_eq!(vocabulary_group(&Role::Concept), Some(VocabularyGroup::Skos));
        assert_eq!(vocabulary_group(&Role::ConceptScheme), Some(VocabularyGroup::Skos));
        assert_eq!(vocabulary_group(&Role::SkosCollection), Some(VocabularyGroup::Skos));
        assert_eq!(
            vocabulary_group(&Role::SkosOrderedCollection),
            Some(VocabularyGroup::Skos)
        );
        assert_eq!(vocabulary_group(&Role::Cls), None);
        assert_eq!(vocabulary_group(&Role::Resource), None);
    }

    #[test]
    fn test_group_membership() {
        assert!(VocabularyGroup::Skos.contains(&Role::SkosOrderedCollection));
        assert!(VocabularyGroup::Skos.contains(&Role::ConceptScheme));
        assert!(!VocabularyGroup::Skos.contains(&Role::Individual));
        assert!(!VocabularyGroup::Skos.contains(&xlabel("en")));
    }

    #[test]
    fn test_languages() {
        assert_eq!(xlabel("it,en").languages(), Some(&"en,it".parse().unwrap()));
        assert_eq!(Role::XLabel(None).languages(), None);
        assert_eq!(Role::Concept.languages(), None);
    }

    #[test]
    fn test_serde_uses_identifier() {
        assert_eq!(
            serde_json::to_string(&Role::ObjectProperty).unwrap(),
            "\"objectProperty\""
        );
        let role: Role = serde_json::from_str(r#""xLabel(\"en\")""#).unwrap();
        assert_eq!(role, xlabel("en"));
    }
}
