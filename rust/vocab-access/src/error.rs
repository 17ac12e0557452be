//! Error types for capability loading and authorization queries.

use thiserror::Error;

use crate::Action;

/// Errors raised while turning capability text into a [`CapabilityStore`].
///
/// A failed load is all-or-nothing: the store is never partially populated.
///
/// [`CapabilityStore`]: crate::CapabilityStore
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The entry is not syntactically valid fact text.
    #[error("Malformed capability entry {entry:?}: {source}")]
    Syntax {
        /// The offending entry, verbatim.
        entry: String,
        /// The underlying syntax error.
        #[source]
        source: vocab_terms::ParseError,
    },

    /// The entry parsed but a fact does not have the shape of a capability.
    #[error("Malformed capability fact `{fact}`: {reason}")]
    Malformed {
        /// The offending fact, rendered canonically.
        fact: String,
        /// Why the fact was rejected.
        #[source]
        reason: TermError,
    },
}

/// Reasons a well-formed term cannot be read as part of a capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    /// The fact is not `capability(Topic, "Letters")`.
    #[error("expected `capability(Topic, Permissions)`, found `{found}`")]
    NotACapability { found: String },

    /// The topic's domain tag is not one of the known domains.
    #[error("unknown domain `{0}`")]
    UnknownDomain(String),

    /// The term does not name a resource role.
    #[error("unknown role `{0}`")]
    UnknownRole(String),

    /// The permission string is empty.
    #[error("permission set is empty")]
    EmptyPermissions,

    /// The permission string contains a letter outside `CRUDV`.
    #[error("invalid permission letter {letter:?} in {letters:?}")]
    InvalidPermission { letter: char, letters: String },

    /// A language list is empty or contains an empty entry.
    #[error("invalid language list {0:?}")]
    InvalidLanguages(String),

    /// A term appears where it cannot be interpreted.
    #[error("unsupported {position} `{term}`")]
    Unsupported {
        /// Which part of the topic was being read.
        position: &'static str,
        /// The term, rendered canonically.
        term: String,
    },
}

fn describe(action: &Option<Action>) -> String {
    match action {
        Some(action) => format!("action {action}"),
        None => "goal template".to_string(),
    }
}

/// Errors surfaced by authorization queries.
///
/// A policy denial is never an error; it is the `Ok(false)` outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A role-dependent goal was queried without a resource. This is a bug in
    /// the caller, not a policy outcome.
    #[error("{} requires a resource role: `{goal}`", describe(.action))]
    MissingResourceRole {
        /// The action whose template needed the role, when known.
        action: Option<Action>,
        /// The unresolved goal template.
        goal: String,
    },
}

/// Result type for authorization queries.
pub type AuthResult<T> = Result<T, AuthError>;
