//! The action catalog.
//!
//! Every permission-gated operation of the editor is an [`Action`], and each
//! action maps to exactly one [`GoalTemplate`]. The mapping is an exhaustive
//! `match`, so adding an action without a template does not compile.
//!
//! ```
//! use vocab_access::{Action, Role};
//!
//! let goal = Action::AddAlignment.resolve(Some(&Role::Concept)).unwrap();
//! assert_eq!(goal.to_string(), r#"capability(rdf(concept, alignment), "C")"#);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::goal::{Goal, GoalTemplate, Slot};
use crate::permission::Permissions;
use crate::role::Role;
use crate::topic::{Domain, Qualifier, Subject};

/// A permission-gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    // Administration
    AdministrationProjectManagement,
    AdministrationRoleManagement,
    AdministrationUserRoleManagement,
    AdministrationUserManagement,
    AdministrationSettings,

    // Alignment
    AddAlignment,
    ReadAlignment,
    DeleteAlignment,

    // Classes and individuals
    CreateClass,
    DeleteClass,
    AddSuperClass,
    RemoveSuperClass,
    ReadClassTaxonomy,
    CreateIndividual,
    DeleteIndividual,

    // Properties
    CreateProperty,
    DeleteProperty,
    AddSuperProperty,
    RemoveSuperProperty,
    AddPropertyDomain,
    RemovePropertyDomain,
    AddPropertyRange,
    RemovePropertyRange,

    // Datatypes
    CreateDatatype,
    DeleteDatatype,

    // Concepts and schemes
    CreateConcept,
    DeleteConcept,
    AddBroaderConcept,
    RemoveBroaderConcept,
    AddTopConcept,
    RemoveTopConcept,
    AddConceptToScheme,
    RemoveConceptFromScheme,
    CreateScheme,
    DeleteScheme,

    // Collections
    CreateCollection,
    DeleteCollection,
    AddToCollection,
    RemoveFromCollection,
    AddFirstToOrderedCollection,
    AddLastToOrderedCollection,
    RemoveFromOrderedCollection,

    // Lexicalizations and xLabels
    AddLexicalization,
    RemoveLexicalization,
    ReadLexicalizations,
    ChangeXLabelLiteralForm,
    DeleteXLabel,

    // Notes
    AddNote,
    UpdateNote,
    RemoveNote,

    // Resource view
    ReadAnyResource,
    AddType,
    RemoveType,
    AddValue,
    RemoveValue,
    UpdateValue,
    AddEquivalent,
    RemoveEquivalent,
    SetDeprecated,

    // Ontology imports
    AddImport,
    RemoveImport,
    ReadImports,

    // Custom forms
    CustomFormCreateForm,
    CustomFormReadForm,
    CustomFormUpdateForm,
    CustomFormDeleteForm,
    CustomFormCreateCollection,
    CustomFormDeleteCollection,
    CustomFormCreateMapping,
    CustomFormDeleteMapping,

    // Data, history and validation
    ExportData,
    LoadData,
    ClearData,
    ReadHistory,
    ValidateChanges,

    // SPARQL
    SparqlEvaluateQuery,
    SparqlExecuteUpdate,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 77] = [
        Action::AdministrationProjectManagement,
        Action::AdministrationRoleManagement,
        Action::AdministrationUserRoleManagement,
        Action::AdministrationUserManagement,
        Action::AdministrationSettings,
        Action::AddAlignment,
        Action::ReadAlignment,
        Action::DeleteAlignment,
        Action::CreateClass,
        Action::DeleteClass,
        Action::AddSuperClass,
        Action::RemoveSuperClass,
        Action::ReadClassTaxonomy,
        Action::CreateIndividual,
        Action::DeleteIndividual,
        Action::CreateProperty,
        Action::DeleteProperty,
        Action::AddSuperProperty,
        Action::RemoveSuperProperty,
        Action::AddPropertyDomain,
        Action::RemovePropertyDomain,
        Action::AddPropertyRange,
        Action::RemovePropertyRange,
        Action::CreateDatatype,
        Action::DeleteDatatype,
        Action::CreateConcept,
        Action::DeleteConcept,
        Action::AddBroaderConcept,
        Action::RemoveBroaderConcept,
        Action::AddTopConcept,
        Action::RemoveTopConcept,
        Action::AddConceptToScheme,
        Action::RemoveConceptFromScheme,
        Action::CreateScheme,
        Action::DeleteScheme,
        Action::CreateCollection,
        Action::DeleteCollection,
        Action::AddToCollection,
        Action::RemoveFromCollection,
        Action::AddFirstToOrderedCollection,
        Action::AddLastToOrderedCollection,
        Action::RemoveFromOrderedCollection,
        Action::AddLexicalization,
        Action::RemoveLexicalization,
        Action::ReadLexicalizations,
        Action::ChangeXLabelLiteralForm,
        Action::DeleteXLabel,
        Action::AddNote,
        Action::UpdateNote,
        Action::RemoveNote,
        Action::ReadAnyResource,
        Action::AddType,
        Action::RemoveType,
        Action::AddValue,
        Action::RemoveValue,
        Action::UpdateValue,
        Action::AddEquivalent,
        Action::RemoveEquivalent,
        Action::SetDeprecated,
        Action::AddImport,
        Action::RemoveImport,
        Action::ReadImports,
        Action::CustomFormCreateForm,
        Action::CustomFormReadForm,
        Action::CustomFormUpdateForm,
        Action::CustomFormDeleteForm,
        Action::CustomFormCreateCollection,
        Action::CustomFormDeleteCollection,
        Action::CustomFormCreateMapping,
        Action::CustomFormDeleteMapping,
        Action::ExportData,
        Action::LoadData,
        Action::ClearData,
        Action::ReadHistory,
        Action::ValidateChanges,
        Action::SparqlEvaluateQuery,
        Action::SparqlExecuteUpdate,
    ];

    /// The goal template this action asks for.
    pub fn template(self) -> GoalTemplate {
        use Action::*;
        use Permissions as P;

        let rdf = Domain::Rdf;
        let on_role = |letters| GoalTemplate::subject(rdf, Slot::ResourceRole, letters);
        let on_role_scoped =
            |scope: &str, letters| GoalTemplate::scoped(rdf, Slot::ResourceRole, Qualifier::atom(scope), letters);
        let on = |role: Role, letters| GoalTemplate::subject(rdf, role, letters);
        let on_scoped =
            |role: Role, scope: &str, letters| GoalTemplate::scoped(rdf, role, Qualifier::atom(scope), letters);
        let lexicalization =
            |letters| GoalTemplate::scoped(rdf, Slot::ResourceRole, Qualifier::Lexicalization(None), letters);

        match self {
            AdministrationProjectManagement => {
                GoalTemplate::subject(Domain::Pm, Subject::atom("project"), P::CRUD)
            }
            AdministrationRoleManagement => {
                GoalTemplate::subject(Domain::Rbac, Subject::atom("role"), P::CRUD)
            }
            AdministrationUserRoleManagement => {
                GoalTemplate::subject(Domain::Rbac, Subject::atom("user"), P::CRUD)
            }
            AdministrationUserManagement => {
                GoalTemplate::subject(Domain::Um, Subject::atom("user"), P::CRUD)
            }
            AdministrationSettings => {
                GoalTemplate::subject(Domain::Sys, Subject::atom("settings"), P::U)
            }

            AddAlignment => on_role_scoped("alignment", P::C),
            ReadAlignment => on_role_scoped("alignment", P::R),
            DeleteAlignment => on_role_scoped("alignment", P::D),

            CreateClass => on(Role::Cls, P::C),
            DeleteClass => on(Role::Cls, P::D),
            AddSuperClass => on_scoped(Role::Cls, "taxonomy", P::C),
            RemoveSuperClass => on_scoped(Role::Cls, "taxonomy", P::D),
            ReadClassTaxonomy => on_scoped(Role::Cls, "taxonomy", P::R),
            CreateIndividual => on(Role::Individual, P::C),
            DeleteIndividual => on(Role::Individual, P::D),

            CreateProperty => on(Role::Property, P::C),
            DeleteProperty => on(Role::Property, P::D),
            AddSuperProperty => on_scoped(Role::Property, "taxonomy", P::C),
            RemoveSuperProperty => on_scoped(Role::Property, "taxonomy", P::D),
            AddPropertyDomain | RemovePropertyDomain | AddPropertyRange | RemovePropertyRange => {
                on(Role::Property, P::U)
            }

            CreateDatatype => on(Role::DataRange, P::C),
            DeleteDatatype => on(Role::DataRange, P::D),

            CreateConcept => on(Role::Concept, P::C),
            DeleteConcept => on(Role::Concept, P::D),
            AddBroaderConcept => on_scoped(Role::Concept, "taxonomy", P::C),
            RemoveBroaderConcept => on_scoped(Role::Concept, "taxonomy", P::D),
            AddTopConcept | AddConceptToScheme => on_scoped(Role::Concept, "schemes", P::C),
            RemoveTopConcept | RemoveConceptFromScheme => {
                on_scoped(Role::Concept, "schemes", P::D)
            }
            CreateScheme => on(Role::ConceptScheme, P::C),
            DeleteScheme => on(Role::ConceptScheme, P::D),

            CreateCollection => on(Role::SkosCollection, P::C),
            DeleteCollection => on(Role::SkosCollection, P::D),
            AddToCollection | RemoveFromCollection => on(Role::SkosCollection, P::U),
            AddFirstToOrderedCollection
            | AddLastToOrderedCollection
            | RemoveFromOrderedCollection => on(Role::SkosOrderedCollection, P::U),

            AddLexicalization => lexicalization(P::C),
            RemoveLexicalization => lexicalization(P::D),
            ReadLexicalizations => lexicalization(P::R),
            ChangeXLabelLiteralForm => on(Role::XLabel(None), P::U),
            DeleteXLabel => on(Role::XLabel(None), P::D),

            AddNote => on_role_scoped("notes", P::C),
            UpdateNote => on_role_scoped("notes", P::U),
            RemoveNote => on_role_scoped("notes", P::D),

            ReadAnyResource => on_role(P::R),
            AddType | RemoveType | AddValue | RemoveValue | UpdateValue | AddEquivalent
            | RemoveEquivalent | SetDeprecated => on_role(P::U),

            AddImport => on_scoped(Role::Ontology, "imports", P::C),
            RemoveImport => on_scoped(Role::Ontology, "imports", P::D),
            ReadImports => on_scoped(Role::Ontology, "imports", P::R),

            CustomFormCreateForm => GoalTemplate::subject(Domain::Cform, Subject::atom("form"), P::C),
            CustomFormReadForm => GoalTemplate::subject(Domain::Cform, Subject::atom("form"), P::R),
            CustomFormUpdateForm => GoalTemplate::subject(Domain::Cform, Subject::atom("form"), P::U),
            CustomFormDeleteForm => GoalTemplate::subject(Domain::Cform, Subject::atom("form"), P::D),
            CustomFormCreateCollection => {
                GoalTemplate::subject(Domain::Cform, Subject::atom("formCollection"), P::C)
            }
            CustomFormDeleteCollection => {
                GoalTemplate::subject(Domain::Cform, Subject::atom("formCollection"), P::D)
            }
            CustomFormCreateMapping => GoalTemplate::scoped(
                Domain::Cform,
                Subject::atom("form"),
                Qualifier::atom("mapping"),
                P::C,
            ),
            CustomFormDeleteMapping => GoalTemplate::scoped(
                Domain::Cform,
                Subject::atom("form"),
                Qualifier::atom("mapping"),
                P::D,
            ),

            ExportData | ReadHistory => GoalTemplate::domain(rdf, P::R),
            LoadData => GoalTemplate::domain(rdf, P::C),
            ClearData => GoalTemplate::domain(rdf, P::D),
            ValidateChanges => GoalTemplate::domain(rdf, P::V),

            SparqlEvaluateQuery => GoalTemplate::subject(rdf, Subject::atom("sparql"), P::R),
            SparqlExecuteUpdate => GoalTemplate::subject(rdf, Subject::atom("sparql"), P::U),
        }
    }

    /// Resolves this action's template against the role of a resource.
    pub fn resolve(self, role: Option<&Role>) -> Result<Goal, AuthError> {
        self.template().resolve(role).map_err(|error| match error {
            AuthError::MissingResourceRole { goal, .. } => AuthError::MissingResourceRole {
                action: Some(self),
                goal,
            },
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_all_is_complete_and_unique() {
        let unique: HashSet<Action> = Action::ALL.into_iter().collect();
        assert_eq!(unique.len(), Action::ALL.len());
    }

    #[test]
    fn test_known_templates() {
        let cases = [
            (Action::CreateConcept, r#"capability(rdf(concept), "C")"#),
            (Action::DeleteScheme, r#"capability(rdf(conceptScheme), "D")"#),
            (
                Action::AddAlignment,
                r#"capability(rdf(ResourceRole, alignment), "C")"#,
            ),
            (
                Action::RemoveLexicalization,
                r#"capability(rdf(ResourceRole, lexicalization), "D")"#,
            ),
            (Action::ReadAnyResource, r#"capability(rdf(ResourceRole), "R")"#),
            (
                Action::AddFirstToOrderedCollection,
                r#"capability(rdf(skosOrderedCollection), "U")"#,
            ),
            (Action::ValidateChanges, r#"capability(rdf, "V")"#),
            (Action::SparqlExecuteUpdate, r#"capability(rdf(sparql), "U")"#),
            (Action::AddImport, r#"capability(rdf(ontology, imports), "C")"#),
            (
                Action::AdministrationProjectManagement,
                r#"capability(pm(project), "CRUD")"#,
            ),
        ];
        for (action, expected) in cases {
            assert_eq!(action.template().to_string(), expected, "{action}");
        }
    }

    #[test]
    fn test_fixed_templates_resolve_without_resource() {
        for action in Action::ALL {
            let template = action.template();
            if !template.needs_resource_role() {
                assert!(action.resolve(None).is_ok(), "{action}");
            }
        }
    }

    #[test]
    fn test_role_templates_require_resource() {
        let error = Action::AddNote.resolve(None).unwrap_err();
        assert_eq!(
            error,
            AuthError::MissingResourceRole {
                action: Some(Action::AddNote),
                goal: r#"capability(rdf(ResourceRole, notes), "C")"#.into(),
            }
        );
        assert_eq!(
            error.to_string(),
            r#"action AddNote requires a resource role: `capability(rdf(ResourceRole, notes), "C")`"#
        );
    }

    #[test]
    fn test_every_template_asks_for_something() {
        for action in Action::ALL {
            assert!(!action.template().permissions.is_empty(), "{action}");
        }
    }

    #[test]
    fn test_serde_uses_variant_name() {
        assert_eq!(
            serde_json::to_string(&Action::CreateConcept).unwrap(),
            "\"CreateConcept\""
        );
        let action: Action = serde_json::from_str("\"ReadAnyResource\"").unwrap();
        assert_eq!(action, Action::ReadAnyResource);
    }
}
