//! Capability-based authorization for a vocabulary editor.
//!
//! Every permission-gated operation of the editor is an [`Action`]. An
//! action asks for a [`Goal`]: a topic such as `rdf(concept)` or
//! `rdf(Role, lexicalization)` together with a set of CRUDV permission
//! letters. The signed-in principal is granted a list of capabilities,
//! written as facts:
//!
//! ```text
//! capability(rdf(concept), "CRUD").
//! capability(rdf(lexicalization("en,it")), "C").
//! capability(rdf(skos), "R").
//! ```
//!
//! A goal is allowed when some capability covers it. Coverage is more than
//! equality: a grant on the bare domain covers everything in it, a grant on
//! a general role covers its specializations (`property` covers
//! `objectProperty`, `resource` covers every role), a grant on the `skos`
//! group covers concepts, schemes and collections, and a language-gated
//! lexicalization grant covers requests for any subset of its languages.
//! In every case the requested letters must be a subset of the granted
//! ones.
//!
//! # Example
//!
//! ```
//! use vocab_access::{Action, Authorizer, AuthorizerConfig, Principal, Role};
//!
//! let authorizer = Authorizer::new(AuthorizerConfig::default());
//! authorizer.sign_in(Principal::user("alice"));
//! authorizer
//!     .init([
//!         r#"capability(rdf(property), "CRUD")."#,
//!         r#"capability(rdf(lexicalization("en")), "C")."#,
//!     ])
//!     .unwrap();
//!
//! // `property` covers `objectProperty`.
//! assert!(authorizer.is_authorized(Action::CreateProperty, None).unwrap());
//! assert!(authorizer
//!     .is_authorized(Action::AddValue, Some(&Role::ObjectProperty))
//!     .unwrap());
//!
//! // Language-gated lexicalizations.
//! let english = "en".parse().unwrap();
//! let bilingual = "en,fr".parse().unwrap();
//! let concept = Role::Concept;
//! assert!(authorizer
//!     .is_authorized_in(Action::AddLexicalization, Some(&concept), &english)
//!     .unwrap());
//! assert!(!authorizer
//!     .is_authorized_in(Action::AddLexicalization, Some(&concept), &bilingual)
//!     .unwrap());
//!
//! // Decisions are cached until the capabilities are reset.
//! authorizer.reset();
//! assert!(!authorizer.is_authorized(Action::CreateProperty, None).unwrap());
//! ```
//!
//! # Core Concepts
//!
//! - [`Role`]s form a taxonomy rooted at `resource`; see [`subsumes`] and
//!   [`vocabulary_group`].
//! - [`Topic`]s are typed: a bare [`Domain`], a domain with a [`Subject`],
//!   or a domain with a subject and a [`Qualifier`].
//! - [`GoalTemplate`]s may hold a placeholder for the role of the resource
//!   being acted upon; [`Action::resolve`] fills it and fails with
//!   [`AuthError::MissingResourceRole`] when no resource is given.
//! - [`evaluator`] holds the matching rules. The [`Authorizer`] caches its
//!   answers per resolved goal.

mod error;
pub use error::*;

mod permission;
pub use permission::*;

mod language;
pub use language::*;

mod role;
pub use role::*;

mod topic;
pub use topic::*;

mod capability;
pub use capability::*;

mod store;
pub use store::*;

mod goal;
pub use goal::*;

mod action;
pub use action::*;

pub mod evaluator;
pub use evaluator::{Derivation, Rule};

mod cache;
pub use cache::*;

mod config;
pub use config::*;

mod principal;
pub use principal::*;

mod authorizer;
pub use authorizer::*;

mod section;
pub use section::*;
