//! Readiness predicate.

use hrscope_identity::IdentitySnapshot;

use crate::NormalizedScope;

/// Decides whether a normalized scope is safe to issue requests under.
///
/// Ready iff tenant and entity are known, the operator's own employee record
/// has resolved, and the operator either sees at least one employee or is an
/// admin. An identity with no visible employees and no admin rights has no
/// meaningful data view yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessPolicy;

impl ReadinessPolicy {
    pub fn is_ready(&self, snapshot: &IdentitySnapshot, scope: &NormalizedScope) -> bool {
        scope.is_complete()
            && snapshot.employee.is_some()
            && (!snapshot.employees.is_empty() || snapshot.is_admin)
    }
}
