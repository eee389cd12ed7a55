//! Retained scope for many concurrent sessions.
//!
//! Server-rendered hosts and multi-window clients resolve scope for several
//! sessions in one process. Each session's retained state is keyed by its
//! [`SessionId`]; no session ever reads another's last-good scope.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use hrscope_core::SessionId;
use hrscope_identity::IdentitySnapshot;

use crate::{RetainedScope, ScopeDescriptor, ScopeResolver, ScopeTransition};

#[derive(Debug, Clone)]
struct SessionEntry {
    retained: RetainedScope,
    last_ready_at: Option<DateTime<Utc>>,
}

/// In-memory, session-isolated retained scope store.
#[derive(Debug, Default)]
pub struct SessionScopeStore {
    resolver: ScopeResolver,
    inner: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionScopeStore {
    pub fn new(resolver: ScopeResolver) -> Self {
        Self {
            resolver,
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve `snapshot` against the session's retained state.
    ///
    /// Unknown sessions start unscoped and are only stored once they resolve
    /// a ready scope. A poisoned lock degrades to an unscoped, not-ready
    /// descriptor so callers skip requests.
    pub fn resolve(&self, session_id: SessionId, snapshot: &IdentitySnapshot) -> ScopeDescriptor {
        self.resolve_at(session_id, snapshot, Utc::now())
    }

    /// As [`Self::resolve`], with an explicit clock reading.
    pub fn resolve_at(
        &self,
        session_id: SessionId,
        snapshot: &IdentitySnapshot,
        now: DateTime<Utc>,
    ) -> ScopeDescriptor {
        let mut map = match self.inner.write() {
            Ok(m) => m,
            Err(_) => {
                tracing::warn!(%session_id, "session scope store lock poisoned");
                return ScopeDescriptor::unscoped();
            }
        };

        let (descriptor, transition) = match map.get_mut(&session_id) {
            Some(entry) => {
                let (descriptor, transition) = self.resolver.step(snapshot, &mut entry.retained);
                if descriptor.is_ready {
                    entry.last_ready_at = Some(now);
                }
                (descriptor, transition)
            }
            None => {
                // Sessions are only tracked once they have a scope worth retaining.
                let mut retained = RetainedScope::Unscoped;
                let (descriptor, transition) = self.resolver.step(snapshot, &mut retained);
                if transition == ScopeTransition::Established {
                    map.insert(
                        session_id,
                        SessionEntry {
                            retained,
                            last_ready_at: Some(now),
                        },
                    );
                }
                (descriptor, transition)
            }
        };

        match transition {
            ScopeTransition::Established | ScopeTransition::Switched { .. } => {
                tracing::debug!(
                    %session_id,
                    tenant_id = ?descriptor.tenant_id,
                    entity_id = ?descriptor.entity_id,
                    "session scope updated"
                );
            }
            ScopeTransition::Held => {
                tracing::trace!(%session_id, "holding last-good scope");
            }
            ScopeTransition::Refreshed | ScopeTransition::Unscoped => {}
        }

        descriptor
    }

    /// The session's retained state, if the session is known.
    pub fn retained(&self, session_id: SessionId) -> Option<RetainedScope> {
        let map = self.inner.read().ok()?;
        map.get(&session_id).map(|e| e.retained.clone())
    }

    /// When the session last resolved a ready scope.
    pub fn last_ready_at(&self, session_id: SessionId) -> Option<DateTime<Utc>> {
        let map = self.inner.read().ok()?;
        map.get(&session_id).and_then(|e| e.last_ready_at)
    }

    /// Session end: drop the session's retained state. Returns whether it existed.
    pub fn end_session(&self, session_id: SessionId) -> bool {
        let Ok(mut map) = self.inner.write() else {
            return false;
        };
        let existed = map.remove(&session_id).is_some();
        if existed {
            tracing::debug!(%session_id, "session scope discarded");
        }
        existed
    }

    pub fn session_count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}
