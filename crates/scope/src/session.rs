use hrscope_core::SessionId;
use hrscope_identity::IdentitySource;

use crate::{RetainedScope, ScopeDescriptor, ScopeResolver};

/// One consuming session: an identity source plus its private retained scope.
///
/// Reads are pull-based and synchronous. The session is not shared across
/// threads; hosts with several windows or request scopes create one each
/// (or use [`crate::SessionScopeStore`]).
#[derive(Debug)]
pub struct ScopeSession<S> {
    id: SessionId,
    source: S,
    resolver: ScopeResolver,
    retained: RetainedScope,
}

impl<S: IdentitySource> ScopeSession<S> {
    pub fn new(source: S, resolver: ScopeResolver) -> Self {
        Self::with_id(SessionId::new(), source, resolver)
    }

    pub fn with_id(id: SessionId, source: S, resolver: ScopeResolver) -> Self {
        Self {
            id,
            source,
            resolver,
            retained: RetainedScope::Unscoped,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Read the current snapshot and resolve it.
    pub fn current(&mut self) -> ScopeDescriptor {
        let snapshot = self.source.snapshot();
        self.resolver.resolve_in_place(&snapshot, &mut self.retained)
    }

    pub fn retained(&self) -> &RetainedScope {
        &self.retained
    }

    /// Session end (logout, context teardown): forget the last-good scope.
    pub fn end(&mut self) {
        if self.retained.is_scoped() {
            tracing::debug!(session_id = %self.id, "scope session ended");
        }
        self.retained.reset();
    }
}
