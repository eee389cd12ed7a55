//! Retained last-good scope: the two-state machine behind the staleness guard.
//!
//! ```text
//!   Unscoped ──(ready observation)──▶ Scoped(v1)
//!   Scoped(v1) ──(ready observation)──▶ Scoped(v2)
//!   Scoped(v1) ──(incomplete observation)──▶ Scoped(v1)
//!   any ──(session end)──▶ Unscoped
//! ```
//!
//! Nothing but a ready observation or an explicit session end moves the state.

use serde::Serialize;

use hrscope_core::{EntityId, TenantId};

use crate::ScopeDescriptor;

/// A scope that was fully valid when observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastGoodScope {
    pub tenant_id: TenantId,
    pub entity_id: EntityId,
    pub user_email: Option<String>,
}

/// Retained state owned by one consuming session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "scope")]
pub enum RetainedScope {
    /// No ready scope has been observed yet.
    #[default]
    Unscoped,
    /// A ready scope was observed and is remembered across incomplete snapshots.
    Scoped(LastGoodScope),
}

/// How a single resolution moved (or didn't move) the retained state.
///
/// Diagnostic only; correctness never depends on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeTransition {
    /// First ready observation of the session.
    Established,
    /// A ready observation replaced a different tenant or entity.
    Switched { from: LastGoodScope, to: LastGoodScope },
    /// A ready observation under the same tenant and entity.
    Refreshed,
    /// Not ready; the last-good scope is being served.
    Held,
    /// Not ready and nothing was ever ready.
    Unscoped,
}

impl RetainedScope {
    pub fn is_scoped(&self) -> bool {
        matches!(self, Self::Scoped(_))
    }

    pub fn last_good(&self) -> Option<&LastGoodScope> {
        match self {
            Self::Unscoped => None,
            Self::Scoped(scope) => Some(scope),
        }
    }

    /// Descriptor surfacing the retained values with the given readiness.
    pub fn descriptor(&self, is_ready: bool) -> ScopeDescriptor {
        match self {
            Self::Unscoped => ScopeDescriptor::unscoped(),
            Self::Scoped(scope) => ScopeDescriptor {
                tenant_id: Some(scope.tenant_id.clone()),
                entity_id: Some(scope.entity_id.clone()),
                user_email: scope.user_email.clone(),
                is_ready,
            },
        }
    }

    /// Record a ready observation, overwriting whatever was retained.
    pub fn observe_ready(&mut self, scope: LastGoodScope) -> ScopeTransition {
        let transition = match self.last_good() {
            None => ScopeTransition::Established,
            Some(prev)
                if prev.tenant_id == scope.tenant_id && prev.entity_id == scope.entity_id =>
            {
                ScopeTransition::Refreshed
            }
            Some(prev) => ScopeTransition::Switched {
                from: prev.clone(),
                to: scope.clone(),
            },
        };
        *self = Self::Scoped(scope);
        transition
    }

    /// Classify an incomplete observation. The state is left untouched.
    pub fn observe_incomplete(&self) -> ScopeTransition {
        if self.is_scoped() {
            ScopeTransition::Held
        } else {
            ScopeTransition::Unscoped
        }
    }

    /// Session end: forget the last-good scope.
    pub fn reset(&mut self) {
        *self = Self::Unscoped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(tenant: &str, entity: &str) -> LastGoodScope {
        LastGoodScope {
            tenant_id: TenantId::parse(tenant).unwrap(),
            entity_id: EntityId::parse(entity).unwrap(),
            user_email: None,
        }
    }

    #[test]
    fn first_ready_observation_establishes() {
        let mut retained = RetainedScope::default();
        assert_eq!(retained.observe_incomplete(), ScopeTransition::Unscoped);

        assert_eq!(retained.observe_ready(scope("t1", "e1")), ScopeTransition::Established);
        assert!(retained.is_scoped());
        assert_eq!(retained.observe_incomplete(), ScopeTransition::Held);
    }

    #[test]
    fn same_scope_refreshes_and_different_scope_switches() {
        let mut retained = RetainedScope::default();
        retained.observe_ready(scope("t1", "e1"));

        assert_eq!(retained.observe_ready(scope("t1", "e1")), ScopeTransition::Refreshed);
        assert_eq!(
            retained.observe_ready(scope("t2", "e1")),
            ScopeTransition::Switched {
                from: scope("t1", "e1"),
                to: scope("t2", "e1"),
            }
        );
        assert_eq!(retained.last_good(), Some(&scope("t2", "e1")));
    }

    #[test]
    fn descriptor_carries_retained_values() {
        let mut retained = RetainedScope::default();
        assert_eq!(retained.descriptor(false), ScopeDescriptor::unscoped());

        retained.observe_ready(scope("t1", "e1"));
        let stale = retained.descriptor(false);
        assert_eq!(stale.tenant_id.unwrap().as_str(), "t1");
        assert_eq!(stale.entity_id.unwrap().as_str(), "e1");
        assert!(!stale.is_ready);
    }

    #[test]
    fn reset_returns_to_unscoped() {
        let mut retained = RetainedScope::default();
        retained.observe_ready(scope("t1", "e1"));
        retained.reset();
        assert_eq!(retained, RetainedScope::Unscoped);
    }
}
