//! The per-session authorization context.
//!
//! An [`Authorizer`] owns the signed-in principal and, once initialized, the
//! granted capabilities together with the decisions computed from them.
//! Every mutation builds a new [`Session`] and swaps it in, so a query
//! always runs against one consistent snapshot even while another thread
//! reloads the capabilities.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::action::Action;
use crate::cache::{CacheStats, DecisionCache};
use crate::capability::Capability;
use crate::config::AuthorizerConfig;
use crate::error::{AuthResult, ParseError};
use crate::evaluator::{self, Rule};
use crate::goal::Goal;
use crate::language::LanguageSet;
use crate::principal::{Principal, Resource};
use crate::store::CapabilityStore;

/// Whether capabilities have been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No capabilities: every non-administrator query is denied.
    Uninitialized,
    /// Capabilities are loaded and queries are evaluated against them.
    Ready,
}

/// Loaded capabilities and everything derived from them.
#[derive(Debug)]
struct Policy {
    store: CapabilityStore,
    cache: DecisionCache,
    evaluations: AtomicU64,
}

impl Policy {
    fn evaluate(&self, goal: &Goal) -> bool {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        evaluator::evaluate(goal, &self.store)
    }
}

/// An immutable snapshot of the authorization context.
#[derive(Debug, Default, Clone)]
struct Session {
    principal: Option<Principal>,
    policy: Option<Arc<Policy>>,
}

impl Session {
    fn is_administrator(&self) -> bool {
        self.principal
            .as_ref()
            .is_some_and(Principal::is_administrator)
    }
}

/// How a query was, or was not, answered positively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    /// The principal is an administrator.
    Administrator,
    /// No capabilities are loaded.
    Uninitialized { goal: Goal },
    /// A capability allows the goal under `rule`.
    Allowed {
        goal: Goal,
        rule: Rule,
        capability: Capability,
    },
    /// No capability allows the goal.
    Denied { goal: Goal },
}

impl Explanation {
    pub fn is_allowed(&self) -> bool {
        matches!(
            self,
            Explanation::Administrator | Explanation::Allowed { .. }
        )
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::Administrator => write!(f, "allowed: administrator"),
            Explanation::Uninitialized { goal } => {
                write!(f, "denied: {goal} (no capabilities loaded)")
            }
            Explanation::Allowed {
                goal,
                rule,
                capability,
            } => write!(f, "allowed: {goal} by {rule} from {}", capability.to_term()),
            Explanation::Denied { goal } => write!(f, "denied: {goal}"),
        }
    }
}

/// Answers "may the current principal perform this action" queries.
///
/// # Example
///
/// ```
/// use vocab_access::{Action, Authorizer, AuthorizerConfig, Principal, Role};
///
/// let authorizer = Authorizer::new(AuthorizerConfig::default());
/// authorizer.sign_in(Principal::user("alice"));
/// authorizer.init([r#"capability(rdf(concept), "CRUD")."#]).unwrap();
///
/// assert!(authorizer.is_authorized(Action::CreateConcept, None).unwrap());
/// assert!(!authorizer.is_authorized(Action::DeleteScheme, None).unwrap());
/// assert!(authorizer.is_authorized(Action::AddNote, None).is_err());
/// assert!(!authorizer.is_authorized(Action::AddNote, Some(&Role::Cls)).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct Authorizer {
    config: AuthorizerConfig,
    session: RwLock<Arc<Session>>,
}

impl Authorizer {
    pub fn new(config: AuthorizerConfig) -> Self {
        Self {
            config,
            session: RwLock::new(Arc::new(Session::default())),
        }
    }

    pub fn config(&self) -> &AuthorizerConfig {
        &self.config
    }

    fn snapshot(&self) -> Arc<Session> {
        self.session.read().clone()
    }

    fn update(&self, change: impl FnOnce(&mut Session)) {
        let mut guard = self.session.write();
        let mut next = Session::clone(&guard);
        change(&mut next);
        *guard = Arc::new(next);
    }

    /// Sets the principal on whose behalf queries are answered. Loaded
    /// capabilities are kept.
    pub fn sign_in(&self, principal: Principal) {
        debug!(
            principal = %principal.id,
            administrator = principal.administrator,
            "Principal signed in"
        );
        self.update(|session| session.principal = Some(principal));
    }

    /// Forgets the principal and its capabilities.
    pub fn sign_out(&self) {
        debug!("Principal signed out");
        self.update(|session| *session = Session::default());
    }

    pub fn principal(&self) -> Option<Principal> {
        self.snapshot().principal.clone()
    }

    /// Parses and loads the principal's capabilities, replacing any loaded
    /// before.
    ///
    /// On error nothing is loaded and the authorizer is left
    /// [`State::Uninitialized`].
    pub fn init<I, S>(&self, capabilities: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match CapabilityStore::parse(capabilities) {
            Ok(store) => {
                self.load(store);
                Ok(())
            }
            Err(error) => {
                warn!(%error, "Failed to load capabilities");
                self.update(|session| session.policy = None);
                Err(error)
            }
        }
    }

    /// Loads already parsed capabilities, replacing any loaded before.
    pub fn load(&self, store: CapabilityStore) {
        debug!(capabilities = store.len(), "Capabilities loaded");
        let policy = Policy {
            store,
            cache: DecisionCache::with_capacity(self.config.cache_capacity),
            evaluations: AtomicU64::new(0),
        };
        self.update(|session| session.policy = Some(Arc::new(policy)));
    }

    /// Drops the capabilities and cached decisions. The principal stays
    /// signed in.
    pub fn reset(&self) {
        debug!("Capabilities reset");
        self.update(|session| session.policy = None);
    }

    pub fn state(&self) -> State {
        if self.snapshot().policy.is_some() {
            State::Ready
        } else {
            State::Uninitialized
        }
    }

    /// Decides whether the current principal may perform `action` on
    /// `resource`.
    ///
    /// Administrators are always allowed. Otherwise the action's goal is
    /// resolved against the resource's role, which fails with
    /// [`AuthError::MissingResourceRole`] when the goal depends on a role
    /// and no resource is given, and is then checked against the loaded
    /// capabilities. Without capabilities the answer is `false`.
    ///
    /// [`AuthError::MissingResourceRole`]: crate::AuthError::MissingResourceRole
    pub fn is_authorized(
        &self,
        action: Action,
        resource: Option<&dyn Resource>,
    ) -> AuthResult<bool> {
        let session = self.snapshot();
        if session.is_administrator() {
            trace!(%action, "Administrator bypass");
            return Ok(true);
        }
        let goal = action.resolve(resource.map(|resource| resource.role()).as_ref())?;
        Ok(self.decide(&session, action, goal))
    }

    /// Like [`is_authorized`](Self::is_authorized), with the goal's language
    /// requirement narrowed to `languages`. Use it for lexicalization and
    /// xLabel actions in a given set of languages.
    pub fn is_authorized_in(
        &self,
        action: Action,
        resource: Option<&dyn Resource>,
        languages: &LanguageSet,
    ) -> AuthResult<bool> {
        let session = self.snapshot();
        if session.is_administrator() {
            trace!(%action, %languages, "Administrator bypass");
            return Ok(true);
        }
        let goal = action
            .resolve(resource.map(|resource| resource.role()).as_ref())?
            .with_languages(languages);
        Ok(self.decide(&session, action, goal))
    }

    fn decide(&self, session: &Session, action: Action, goal: Goal) -> bool {
        let Some(policy) = &session.policy else {
            if self.config.log_denials {
                debug!(%action, %goal, "Denied: no capabilities loaded");
            }
            return false;
        };
        let allowed = if self.config.cache_decisions {
            policy
                .cache
                .get_or_insert_with(&goal, || policy.evaluate(&goal))
        } else {
            policy.evaluate(&goal)
        };
        if !allowed && self.config.log_denials {
            debug!(%action, %goal, "Denied");
        }
        allowed
    }

    /// Explains how a query would be answered. Nothing is cached.
    pub fn explain(
        &self,
        action: Action,
        resource: Option<&dyn Resource>,
    ) -> AuthResult<Explanation> {
        let session = self.snapshot();
        if session.is_administrator() {
            return Ok(Explanation::Administrator);
        }
        let goal = action.resolve(resource.map(|resource| resource.role()).as_ref())?;
        let Some(policy) = &session.policy else {
            return Ok(Explanation::Uninitialized { goal });
        };
        Ok(match evaluator::derive(&goal, &policy.store) {
            Some(derivation) => Explanation::Allowed {
                rule: derivation.rule,
                capability: derivation.capability.clone(),
                goal,
            },
            None => Explanation::Denied { goal },
        })
    }

    /// Counters for the current capabilities. All zero when uninitialized.
    pub fn stats(&self) -> CacheStats {
        match &self.snapshot().policy {
            Some(policy) => CacheStats {
                hits: policy.cache.hits(),
                misses: policy.cache.misses(),
                evaluations: policy.evaluations.load(Ordering::Relaxed),
                entries: policy.cache.len(),
            },
            None => CacheStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use crate::role::Role;
    use pretty_assertions::assert_eq;

    fn ready(capabilities: &[&str]) -> Authorizer {
        let authorizer = Authorizer::default();
        authorizer.sign_in(Principal::user("alice"));
        authorizer.init(capabilities).unwrap();
        authorizer
    }

    #[test]
    fn test_authorizer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Authorizer>();
    }

    #[test]
    fn test_starts_uninitialized() {
        let authorizer = Authorizer::default();
        assert_eq!(authorizer.state(), State::Uninitialized);
        assert_eq!(authorizer.principal(), None);
        assert!(!authorizer.is_authorized(Action::ExportData, None).unwrap());
    }

    #[test]
    fn test_failed_init_leaves_uninitialized() {
        let authorizer = ready(&[r#"capability(rdf, "R")."#]);
        assert_eq!(authorizer.state(), State::Ready);

        let error = authorizer.init([r#"capability(rdf, "Q")."#]).unwrap_err();
        assert!(matches!(error, ParseError::Malformed { .. }));
        assert_eq!(authorizer.state(), State::Uninitialized);
        assert!(!authorizer.is_authorized(Action::ExportData, None).unwrap());
    }

    #[test]
    fn test_missing_role_in_any_state() {
        let authorizer = Authorizer::default();
        assert!(matches!(
            authorizer.is_authorized(Action::AddLexicalization, None),
            Err(AuthError::MissingResourceRole { .. })
        ));
        authorizer.init([r#"capability(rdf, "CRUDV")."#]).unwrap();
        assert!(matches!(
            authorizer.is_authorized(Action::AddLexicalization, None),
            Err(AuthError::MissingResourceRole { .. })
        ));
    }

    #[test]
    fn test_explain() {
        let authorizer = ready(&[r#"capability(rdf(skos), "CRUD")."#]);
        let explanation = authorizer
            .explain(Action::CreateCollection, None)
            .unwrap();
        assert!(explanation.is_allowed());
        assert_eq!(
            explanation.to_string(),
            r#"allowed: capability(rdf(skosCollection), "C") by vocabulary grouping from capability(rdf(skos), "CRUD")"#
        );

        let explanation = authorizer.explain(Action::CreateClass, None).unwrap();
        assert_eq!(
            explanation.to_string(),
            r#"denied: capability(rdf(cls), "C")"#
        );
        assert_eq!(authorizer.stats().evaluations, 0);
    }

    #[test]
    fn test_disabled_cache_always_evaluates() {
        let authorizer =
            Authorizer::new(AuthorizerConfig::default().with_cache_decisions(false));
        authorizer.init([r#"capability(rdf, "R")."#]).unwrap();
        for _ in 0..3 {
            assert!(authorizer
                .is_authorized(Action::ReadAnyResource, Some(&Role::Concept))
                .unwrap());
        }
        let stats = authorizer.stats();
        assert_eq!(stats.evaluations, 3);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_sign_out_forgets_everything() {
        let authorizer = ready(&[r#"capability(rdf, "R")."#]);
        authorizer.sign_out();
        assert_eq!(authorizer.principal(), None);
        assert_eq!(authorizer.state(), State::Uninitialized);
    }

    #[test]
    fn test_sign_in_keeps_capabilities() {
        let authorizer = ready(&[r#"capability(rdf, "R")."#]);
        authorizer.sign_in(Principal::user("bob"));
        assert_eq!(authorizer.state(), State::Ready);
        assert_eq!(authorizer.principal(), Some(Principal::user("bob")));
    }
}
