//! The signed-in principal and the resources it acts upon.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The user on whose behalf queries are answered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// Login or other stable identifier, used only for logging.
    pub id: String,
    /// Administrators are allowed every action without consulting
    /// capabilities.
    #[serde(default)]
    pub administrator: bool,
}

impl Principal {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            administrator: false,
        }
    }

    pub fn administrator(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            administrator: true,
        }
    }

    pub fn is_administrator(&self) -> bool {
        self.administrator
    }
}

/// Anything an action can target. Only its role matters for authorization.
pub trait Resource {
    fn role(&self) -> Role;
}

impl Resource for Role {
    fn role(&self) -> Role {
        self.clone()
    }
}

/// A resource identified by IRI, as handed over by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub iri: String,
    pub role: Role,
}

impl ResourceHandle {
    pub fn new(iri: impl Into<String>, role: Role) -> Self {
        Self {
            iri: iri.into(),
            role,
        }
    }
}

impl Resource for ResourceHandle {
    fn role(&self) -> Role {
        self.role.clone()
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn role(&self) -> Role {
        (**self).role()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_constructors() {
        assert!(!Principal::user("alice").is_administrator());
        assert!(Principal::administrator("root").is_administrator());
    }

    #[test]
    fn test_administrator_flag_defaults_to_false() {
        let principal: Principal = serde_json::from_str(r#"{ "id": "bob" }"#).unwrap();
        assert_eq!(principal, Principal::user("bob"));
    }

    #[test]
    fn test_handle_exposes_role() {
        let handle = ResourceHandle::new("http://example.org/c1", Role::Concept);
        assert_eq!(handle.role(), Role::Concept);
        assert_eq!(Role::Cls.role(), Role::Cls);
    }
}
