//! Identity snapshot model.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use hrscope_core::TenantId;

use crate::{EmployeeRecord, SessionUser};

/// Raw identifier fields keyed by their upstream field name.
///
/// Upstream call sites populate the same concept under different names
/// (`entityId`, `company_entity_id`, ...). Keeping them by name lets a lookup
/// list decide precedence without this type knowing any of the names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Identifiers(BTreeMap<String, String>);

impl<'de> Deserialize<'de> for Identifiers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut ids = Identifiers::new();
        for (field, value) in raw {
            ids.insert(field, value);
        }
        Ok(ids)
    }
}

impl Identifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value. Blank values are ignored.
    pub fn insert(&mut self, field: impl Into<String>, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.0.insert(field.into(), value.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Point-in-time view of the current identity, as produced by the provider.
///
/// Any field may be missing while the provider is still resolving (login,
/// route change, background refresh). Readers must treat absence as normal.
///
/// Decode provider payloads with [`IdentitySnapshot::from_json`], which
/// coerces malformed fields to absent instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentitySnapshot {
    pub tenant_id: Option<TenantId>,
    pub identifiers: Identifiers,
    pub user: Option<SessionUser>,
    /// The operator's own employee record, present once resolved.
    pub employee: Option<EmployeeRecord>,
    /// Employees the operator can act upon.
    pub employees: Vec<EmployeeRecord>,
    pub is_admin: bool,
}

impl IdentitySnapshot {
    /// An empty snapshot (nothing resolved yet).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_tenant(mut self, tenant_id: &str) -> Self {
        self.tenant_id = TenantId::parse(tenant_id);
        self
    }

    pub fn with_identifier(mut self, field: &str, value: &str) -> Self {
        self.identifiers.insert(field, value);
        self
    }

    pub fn with_user_email(mut self, email: &str) -> Self {
        self.user = Some(SessionUser::with_email(email));
        self
    }

    pub fn with_employee(mut self, employee: EmployeeRecord) -> Self {
        self.employee = Some(employee);
        self
    }

    pub fn with_employees(mut self, employees: Vec<EmployeeRecord>) -> Self {
        self.employees = employees;
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Email of the session user, if known and non-blank.
    pub fn user_email(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .filter(|e| !e.trim().is_empty())
    }

    /// Email on the operator's own employee record, if known and non-blank.
    pub fn employee_email(&self) -> Option<&str> {
        self.employee
            .as_ref()
            .and_then(|e| e.email.as_deref())
            .filter(|e| !e.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_skip_blank_values() {
        let mut ids = Identifiers::new();
        ids.insert("entityId", "   ");
        ids.insert("entity_id", " e1 ");

        assert_eq!(ids.get("entityId"), None);
        assert_eq!(ids.get("entity_id"), Some("e1"));
    }

    #[test]
    fn blank_emails_read_as_absent() {
        let snapshot = IdentitySnapshot::empty()
            .with_user_email("  ")
            .with_employee(EmployeeRecord::new("emp-1").with_email("b@x.com"));

        assert_eq!(snapshot.user_email(), None);
        assert_eq!(snapshot.employee_email(), Some("b@x.com"));
    }

    #[test]
    fn deserialized_identifiers_drop_blank_values() {
        let ids: Identifiers =
            serde_json::from_str(r#"{"entityId": "  ", "entity_id": " e1 "}"#).unwrap();

        assert_eq!(ids.get("entityId"), None);
        assert_eq!(ids.get("entity_id"), Some("e1"));
    }

    #[test]
    fn blank_tenant_is_absent() {
        let snapshot = IdentitySnapshot::empty().with_tenant("");
        assert!(snapshot.tenant_id.is_none());
    }
}
