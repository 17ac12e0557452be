//! Permission checks for the editor's resource view and tree panels.
//!
//! Each resource view section offers "add" and "remove" controls; whether
//! they are enabled is a fixed combination of action checks against the
//! resource being viewed.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::authorizer::Authorizer;
use crate::error::AuthResult;
use crate::principal::{Principal, Resource};
use crate::role::Role;

/// A section of the resource view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceViewSection {
    Types,
    SuperClasses,
    SuperProperties,
    Broaders,
    Lexicalizations,
    Notes,
    Schemes,
    TopConceptOf,
    Members,
    Equivalents,
    Domains,
    Ranges,
    Imports,
    Properties,
}

impl ResourceViewSection {
    pub const ALL: [ResourceViewSection; 14] = [
        ResourceViewSection::Types,
        ResourceViewSection::SuperClasses,
        ResourceViewSection::SuperProperties,
        ResourceViewSection::Broaders,
        ResourceViewSection::Lexicalizations,
        ResourceViewSection::Notes,
        ResourceViewSection::Schemes,
        ResourceViewSection::TopConceptOf,
        ResourceViewSection::Members,
        ResourceViewSection::Equivalents,
        ResourceViewSection::Domains,
        ResourceViewSection::Ranges,
        ResourceViewSection::Imports,
        ResourceViewSection::Properties,
    ];
}

fn is_ordered(resource: &dyn Resource) -> bool {
    resource.role() == Role::SkosOrderedCollection
}

impl Authorizer {
    /// Whether the "add" control of `section` is enabled for `resource`.
    pub fn is_add_authorized(
        &self,
        section: ResourceViewSection,
        resource: &dyn Resource,
    ) -> AuthResult<bool> {
        use ResourceViewSection::*;

        let check = |action| self.is_authorized(action, Some(resource));
        match section {
            Types => check(Action::AddType),
            SuperClasses => check(Action::AddSuperClass),
            SuperProperties => check(Action::AddSuperProperty),
            Broaders => check(Action::AddBroaderConcept),
            Lexicalizations => check(Action::AddLexicalization),
            Notes => check(Action::AddNote),
            Schemes => check(Action::AddConceptToScheme),
            TopConceptOf => check(Action::AddTopConcept),
            Members if is_ordered(resource) => Ok(check(Action::AddFirstToOrderedCollection)?
                || check(Action::AddLastToOrderedCollection)?),
            Members => check(Action::AddToCollection),
            Equivalents => check(Action::AddEquivalent),
            Domains => check(Action::AddPropertyDomain),
            Ranges => check(Action::AddPropertyRange),
            Imports => check(Action::AddImport),
            Properties => check(Action::AddValue),
        }
    }

    /// Whether the "remove" control of `section` is enabled for `resource`.
    pub fn is_remove_authorized(
        &self,
        section: ResourceViewSection,
        resource: &dyn Resource,
    ) -> AuthResult<bool> {
        use ResourceViewSection::*;

        let check = |action| self.is_authorized(action, Some(resource));
        match section {
            Types => check(Action::RemoveType),
            SuperClasses => check(Action::RemoveSuperClass),
            SuperProperties => check(Action::RemoveSuperProperty),
            Broaders => check(Action::RemoveBroaderConcept),
            Lexicalizations => check(Action::RemoveLexicalization),
            Notes => check(Action::RemoveNote),
            Schemes => check(Action::RemoveConceptFromScheme),
            TopConceptOf => check(Action::RemoveTopConcept),
            Members if is_ordered(resource) => check(Action::RemoveFromOrderedCollection),
            Members => check(Action::RemoveFromCollection),
            Equivalents => check(Action::RemoveEquivalent),
            Domains => check(Action::RemovePropertyDomain),
            Ranges => check(Action::RemovePropertyRange),
            Imports => check(Action::RemoveImport),
            Properties => check(Action::RemoveValue),
        }
    }

    /// Whether a tree or list panel of `role` resources may create new
    /// ones. For roles without a creation action only administrators may.
    pub fn is_tree_create_authorized(&self, role: &Role) -> AuthResult<bool> {
        match tree_actions(role) {
            Some((create, _)) => self.is_authorized(create, None),
            None => Ok(self.is_administrator()),
        }
    }

    /// Whether a tree or list panel of `role` resources may delete them.
    pub fn is_tree_delete_authorized(&self, role: &Role) -> AuthResult<bool> {
        match tree_actions(role) {
            Some((_, delete)) => self.is_authorized(delete, None),
            None => Ok(self.is_administrator()),
        }
    }

    fn is_administrator(&self) -> bool {
        self.principal()
            .as_ref()
            .is_some_and(Principal::is_administrator)
    }
}

/// The create and delete actions of the tree panel listing `role`.
fn tree_actions(role: &Role) -> Option<(Action, Action)> {
    match role {
        Role::Cls => Some((Action::CreateClass, Action::DeleteClass)),
        Role::Individual => Some((Action::CreateIndividual, Action::DeleteIndividual)),
        Role::Property
        | Role::ObjectProperty
        | Role::DatatypeProperty
        | Role::AnnotationProperty
        | Role::OntologyProperty => Some((Action::CreateProperty, Action::DeleteProperty)),
        Role::Concept => Some((Action::CreateConcept, Action::DeleteConcept)),
        Role::ConceptScheme => Some((Action::CreateScheme, Action::DeleteScheme)),
        Role::SkosCollection | Role::SkosOrderedCollection => {
            Some((Action::CreateCollection, Action::DeleteCollection))
        }
        Role::DataRange => Some((Action::CreateDatatype, Action::DeleteDatatype)),
        Role::XLabel(_) | Role::Ontology | Role::Resource => None,
    }
}
