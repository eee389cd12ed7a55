//! Lenient decoding of provider payloads into [`IdentitySnapshot`].
//!
//! The provider's payload shape has drifted over time, so decoding never
//! fails: anything missing, mistyped or blank is simply absent.

use serde_json::{Map, Value};

use hrscope_core::TenantId;

use crate::{EmployeeRecord, IdentitySnapshot, SessionUser};

const TENANT_KEYS: &[&str] = &["tenantId", "tenant_id"];
const ADMIN_KEYS: &[&str] = &["isAdmin", "is_admin"];
const RESERVED_KEYS: &[&str] = &[
    "tenantId",
    "tenant_id",
    "isAdmin",
    "is_admin",
    "user",
    "employee",
    "employees",
];
const DISPLAY_NAME_KEYS: &[&str] = &["display_name", "displayName", "full_name", "fullName"];

impl IdentitySnapshot {
    /// Decode a provider payload.
    ///
    /// Every top-level string or number field that is not one of the known
    /// structural keys is kept in `identifiers`, so new alias names flow
    /// through without a decoder change.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            if !value.is_null() {
                tracing::trace!("identity payload is not an object; treating as empty");
            }
            return Self::empty();
        };

        let mut snapshot = Self::empty();

        snapshot.tenant_id = TENANT_KEYS
            .iter()
            .filter_map(|k| obj.get(*k).and_then(scalar_string))
            .find_map(|raw| TenantId::parse(&raw));

        for (key, v) in obj {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            if let Some(raw) = scalar_string(v) {
                snapshot.identifiers.insert(key.clone(), raw);
            }
        }

        snapshot.user = obj.get("user").and_then(Value::as_object).map(|u| SessionUser {
            email: u.get("email").and_then(non_blank_str),
        });

        snapshot.employee = obj
            .get("employee")
            .and_then(Value::as_object)
            .map(decode_employee);

        snapshot.employees = obj
            .get("employees")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(decode_employee)
                    .collect()
            })
            .unwrap_or_default();

        snapshot.is_admin = ADMIN_KEYS
            .iter()
            .any(|k| matches!(obj.get(*k), Some(Value::Bool(true))));

        snapshot
    }
}

fn decode_employee(obj: &Map<String, Value>) -> EmployeeRecord {
    let mut record = EmployeeRecord {
        id: obj.get("id").and_then(scalar_string),
        email: obj.get("email").and_then(non_blank_str),
        display_name: DISPLAY_NAME_KEYS
            .iter()
            .find_map(|k| obj.get(*k).and_then(non_blank_str)),
        attributes: Map::new(),
    };

    for (key, v) in obj {
        if key == "id" || key == "email" || DISPLAY_NAME_KEYS.contains(&key.as_str()) {
            continue;
        }
        record.attributes.insert(key.clone(), v.clone());
    }

    record
}

/// Strings and numbers are identifier-shaped; everything else is not.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_payload() {
        let snapshot = IdentitySnapshot::from_json(&json!({
            "tenantId": "t1",
            "entity_id": "e1",
            "employee": { "id": "emp-1", "email": "self@x.com", "fullName": "Ada" },
            "employees": [{ "id": "emp-2" }],
            "user": { "email": "a@x.com" },
            "isAdmin": false
        }));

        assert_eq!(snapshot.tenant_id.as_ref().map(|t| t.as_str()), Some("t1"));
        assert_eq!(snapshot.identifiers.get("entity_id"), Some("e1"));
        assert_eq!(snapshot.user_email(), Some("a@x.com"));
        assert_eq!(snapshot.employee_email(), Some("self@x.com"));
        assert_eq!(
            snapshot.employee.as_ref().and_then(|e| e.display_name.as_deref()),
            Some("Ada")
        );
        assert_eq!(snapshot.employees.len(), 1);
        assert!(!snapshot.is_admin);
    }

    #[test]
    fn non_object_payload_is_empty() {
        assert_eq!(IdentitySnapshot::from_json(&Value::Null), IdentitySnapshot::empty());
        assert_eq!(IdentitySnapshot::from_json(&json!([1, 2])), IdentitySnapshot::empty());
        assert_eq!(IdentitySnapshot::from_json(&json!("t1")), IdentitySnapshot::empty());
    }

    #[test]
    fn malformed_fields_are_absent() {
        let snapshot = IdentitySnapshot::from_json(&json!({
            "tenantId": { "nested": true },
            "entityId": "   ",
            "companyEntityId": false,
            "employee": "emp-1",
            "employees": "everyone",
            "user": { "email": 42 },
            "isAdmin": "true"
        }));

        assert!(snapshot.tenant_id.is_none());
        assert!(snapshot.identifiers.is_empty());
        assert!(snapshot.employee.is_none());
        assert!(snapshot.employees.is_empty());
        assert_eq!(snapshot.user_email(), None);
        assert!(!snapshot.is_admin);
    }

    #[test]
    fn numeric_identifiers_are_stringified() {
        let snapshot = IdentitySnapshot::from_json(&json!({
            "tenant_id": 7,
            "company_entity_id": 1201
        }));

        assert_eq!(snapshot.tenant_id.as_ref().map(|t| t.as_str()), Some("7"));
        assert_eq!(snapshot.identifiers.get("company_entity_id"), Some("1201"));
    }

    #[test]
    fn employees_skip_non_object_elements() {
        let snapshot = IdentitySnapshot::from_json(&json!({
            "employees": [{ "id": "a" }, null, 3, { "id": "b", "department": "ops" }]
        }));

        assert_eq!(snapshot.employees.len(), 2);
        assert_eq!(
            snapshot.employees[1].attributes.get("department"),
            Some(&json!("ops"))
        );
    }

    #[test]
    fn structural_keys_never_become_identifiers() {
        let snapshot = IdentitySnapshot::from_json(&json!({
            "tenantId": "t1",
            "is_admin": true
        }));

        assert!(snapshot.identifiers.get("tenantId").is_none());
        assert!(snapshot.is_admin);
    }
}
