//! Scope resolution: snapshot + retained state → descriptor + retained state.

use hrscope_identity::IdentitySnapshot;

use crate::normalize::EntitySource;
use crate::retained::LastGoodScope;
use crate::{
    EntityIdAliases, ReadinessPolicy, RetainedScope, ScopeConfig, ScopeDescriptor, ScopeTransition,
    normalize,
};

/// Derives scope descriptors from identity snapshots.
///
/// The resolver is stateless; retained state is passed in by whoever owns
/// the session. Each call is O(aliases) field lookups, with no IO and no
/// failure path: incomplete input yields `is_ready == false`.
#[derive(Debug, Clone, Default)]
pub struct ScopeResolver {
    aliases: EntityIdAliases,
    policy: ReadinessPolicy,
}

impl ScopeResolver {
    pub fn new(aliases: EntityIdAliases) -> Self {
        Self {
            aliases,
            policy: ReadinessPolicy,
        }
    }

    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(config.entity_id_aliases.clone())
    }

    pub fn aliases(&self) -> &EntityIdAliases {
        &self.aliases
    }

    /// Pure form: returns the descriptor and the next retained state.
    pub fn resolve(
        &self,
        snapshot: &IdentitySnapshot,
        retained: &RetainedScope,
    ) -> (ScopeDescriptor, RetainedScope) {
        let mut next = retained.clone();
        let descriptor = self.resolve_in_place(snapshot, &mut next);
        (descriptor, next)
    }

    /// Resolve and update `retained` in place.
    pub fn resolve_in_place(
        &self,
        snapshot: &IdentitySnapshot,
        retained: &mut RetainedScope,
    ) -> ScopeDescriptor {
        let (descriptor, transition) = self.step(snapshot, retained);
        log_transition(&transition, &descriptor);
        descriptor
    }

    /// Resolve and report how the retained state moved.
    pub fn step(
        &self,
        snapshot: &IdentitySnapshot,
        retained: &mut RetainedScope,
    ) -> (ScopeDescriptor, ScopeTransition) {
        let normalized = normalize(snapshot, &self.aliases);
        let is_ready = self.policy.is_ready(snapshot, &normalized);

        let ready_scope = match (is_ready, normalized.tenant_id, normalized.entity_id) {
            (true, Some(tenant_id), Some(entity_id)) => Some(LastGoodScope {
                tenant_id,
                entity_id,
                user_email: normalized.user_email,
            }),
            _ => None,
        };

        match ready_scope {
            Some(scope) => {
                if normalized.entity_source == EntitySource::TenantFallback {
                    tracing::trace!(
                        tenant_id = %scope.tenant_id,
                        "entity id fell back to tenant id"
                    );
                }
                let transition = retained.observe_ready(scope);
                (retained.descriptor(true), transition)
            }
            None => (retained.descriptor(false), retained.observe_incomplete()),
        }
    }
}

fn log_transition(transition: &ScopeTransition, descriptor: &ScopeDescriptor) {
    match transition {
        ScopeTransition::Established => {
            tracing::debug!(
                tenant_id = ?descriptor.tenant_id,
                entity_id = ?descriptor.entity_id,
                "scope established"
            );
        }
        ScopeTransition::Switched { from, to } => {
            tracing::debug!(
                from_tenant = %from.tenant_id,
                from_entity = %from.entity_id,
                to_tenant = %to.tenant_id,
                to_entity = %to.entity_id,
                "scope switched"
            );
        }
        ScopeTransition::Held => {
            tracing::trace!(
                tenant_id = ?descriptor.tenant_id,
                "snapshot incomplete; holding last-good scope"
            );
        }
        ScopeTransition::Refreshed | ScopeTransition::Unscoped => {}
    }
}
