//! The scope descriptor handed to data-fetching components.

use serde::{Deserialize, Serialize};

use hrscope_core::{EntityId, TenantId};

/// Minimal tuple of identifiers needed to issue a tenant/entity-scoped request.
///
/// # Invariants
/// - `is_ready` implies `tenant_id` and `entity_id` are both set.
/// - When not ready, the identifiers are the last ready scope the session saw
///   (or all absent if it never saw one). They are for display and cache keys,
///   never for issuing requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeDescriptor {
    pub tenant_id: Option<TenantId>,
    pub entity_id: Option<EntityId>,
    pub user_email: Option<String>,
    pub is_ready: bool,
}

impl ScopeDescriptor {
    /// Nothing known, not ready.
    pub fn unscoped() -> Self {
        Self {
            tenant_id: None,
            entity_id: None,
            user_email: None,
            is_ready: false,
        }
    }

    /// Tags for an outbound request, only while ready.
    ///
    /// Components gate fetches on this: `None` means skip the request.
    pub fn request_scope(&self) -> Option<RequestScope> {
        if !self.is_ready {
            return None;
        }
        match (&self.tenant_id, &self.entity_id) {
            (Some(tenant_id), Some(entity_id)) => Some(RequestScope {
                tenant_id: tenant_id.clone(),
                entity_id: entity_id.clone(),
                user_email: self.user_email.clone(),
            }),
            _ => None,
        }
    }
}

impl Default for ScopeDescriptor {
    fn default() -> Self {
        Self::unscoped()
    }
}

/// Identifiers an outbound request is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestScope {
    pub tenant_id: TenantId,
    pub entity_id: EntityId,
    pub user_email: Option<String>,
}

impl RequestScope {
    /// Whether this request scope targets the given tenant.
    pub fn is_tenant(&self, tenant_id: &TenantId) -> bool {
        &self.tenant_id == tenant_id
    }
}
