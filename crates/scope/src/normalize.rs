//! Field normalization: snapshot → `(tenant, entity, email)`.

use serde::Serialize;

use hrscope_core::{EntityId, TenantId};
use hrscope_identity::IdentitySnapshot;

use crate::EntityIdAliases;

/// Where the resolved entity id came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "field")]
pub enum EntitySource {
    /// One of the configured alias fields.
    Alias(String),
    /// No alias was set; the tenant id stands in for the entity id.
    TenantFallback,
    /// Neither an alias nor a tenant id was available.
    Missing,
}

/// Identifiers extracted from one snapshot, before any readiness decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedScope {
    pub tenant_id: Option<TenantId>,
    pub entity_id: Option<EntityId>,
    pub user_email: Option<String>,
    #[serde(skip)]
    pub entity_source: EntitySource,
}

impl NormalizedScope {
    /// All fields absent.
    pub fn empty() -> Self {
        Self {
            tenant_id: None,
            entity_id: None,
            user_email: None,
            entity_source: EntitySource::Missing,
        }
    }

    /// Both tenant and entity are known.
    pub fn is_complete(&self) -> bool {
        self.tenant_id.is_some() && self.entity_id.is_some()
    }
}

/// Extract tenant, entity and email from a snapshot.
///
/// Entity id precedence: the alias list in order, then the tenant id.
/// Email precedence: session user, then the operator's employee record.
///
// TODO: confirm with product whether the tenant→entity fallback is meant for
// single-entity tenants only; today it also hides missing entity data.
pub fn normalize(snapshot: &IdentitySnapshot, aliases: &EntityIdAliases) -> NormalizedScope {
    let tenant_id = snapshot.tenant_id.clone();

    let (entity_id, entity_source) = match aliases.lookup(&snapshot.identifiers) {
        Some((field, id)) => (Some(id), EntitySource::Alias(field.to_string())),
        None => match &tenant_id {
            Some(tenant) => (Some(EntityId::from(tenant.clone())), EntitySource::TenantFallback),
            None => (None, EntitySource::Missing),
        },
    };

    let user_email = snapshot
        .user_email()
        .or_else(|| snapshot.employee_email())
        .map(|e| e.trim().to_string());

    NormalizedScope {
        tenant_id,
        entity_id,
        user_email,
        entity_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrscope_identity::EmployeeRecord;

    #[test]
    fn snake_case_company_alias_beats_tenant_fallback() {
        let snapshot = IdentitySnapshot::empty()
            .with_tenant("t1")
            .with_identifier("company_entity_id", "ce-9");

        let scope = normalize(&snapshot, &EntityIdAliases::default());
        assert_eq!(scope.entity_id.unwrap().as_str(), "ce-9");
        assert_eq!(scope.entity_source, EntitySource::Alias("company_entity_id".into()));
    }

    #[test]
    fn entity_falls_back_to_tenant() {
        let snapshot = IdentitySnapshot::empty().with_tenant("t1");

        let scope = normalize(&snapshot, &EntityIdAliases::default());
        assert_eq!(scope.entity_id.unwrap().as_str(), "t1");
        assert_eq!(scope.entity_source, EntitySource::TenantFallback);
    }

    #[test]
    fn entity_alias_without_tenant_still_resolves() {
        let snapshot = IdentitySnapshot::empty().with_identifier("entityId", "e1");

        let scope = normalize(&snapshot, &EntityIdAliases::default());
        assert!(scope.tenant_id.is_none());
        assert_eq!(scope.entity_id.unwrap().as_str(), "e1");
        assert!(!NormalizedScope::empty().is_complete());
    }

    #[test]
    fn user_email_preferred_over_employee_email() {
        let employee = EmployeeRecord::new("emp-1").with_email("emp@x.com");
        let with_user = IdentitySnapshot::empty()
            .with_user_email("user@x.com")
            .with_employee(employee.clone());
        let without_user = IdentitySnapshot::empty().with_employee(employee);

        let aliases = EntityIdAliases::default();
        assert_eq!(normalize(&with_user, &aliases).user_email.as_deref(), Some("user@x.com"));
        assert_eq!(normalize(&without_user, &aliases).user_email.as_deref(), Some("emp@x.com"));
    }

    #[test]
    fn empty_snapshot_normalizes_to_empty() {
        let scope = normalize(&IdentitySnapshot::empty(), &EntityIdAliases::default());
        assert_eq!(scope, NormalizedScope::empty());
    }
}
