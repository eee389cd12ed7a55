use std::sync::{Arc, RwLock};

use crate::IdentitySnapshot;

/// Pull-based access to the current identity snapshot.
///
/// Implementations resolve identity asynchronously on their own cadence;
/// `snapshot` only reports whatever is current and must not block on a fetch.
pub trait IdentitySource {
    fn snapshot(&self) -> IdentitySnapshot;
}

impl<S> IdentitySource for Arc<S>
where
    S: IdentitySource + ?Sized,
{
    fn snapshot(&self) -> IdentitySnapshot {
        (**self).snapshot()
    }
}

impl<S> IdentitySource for &S
where
    S: IdentitySource + ?Sized,
{
    fn snapshot(&self) -> IdentitySnapshot {
        (**self).snapshot()
    }
}

/// In-memory identity source for tests/dev and for hosts that push snapshots.
///
/// Cloning shares the same underlying cell.
#[derive(Debug, Clone, Default)]
pub struct SharedIdentitySource {
    inner: Arc<RwLock<IdentitySnapshot>>,
}

impl SharedIdentitySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: IdentitySnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Replace the current snapshot.
    pub fn publish(&self, snapshot: IdentitySnapshot) {
        if let Ok(mut current) = self.inner.write() {
            *current = snapshot;
        } else {
            tracing::warn!("identity source lock poisoned; snapshot dropped");
        }
    }

    /// Reset to an empty snapshot (e.g. while the provider reloads).
    pub fn clear(&self) {
        self.publish(IdentitySnapshot::empty());
    }
}

impl IdentitySource for SharedIdentitySource {
    fn snapshot(&self) -> IdentitySnapshot {
        match self.inner.read() {
            Ok(current) => current.clone(),
            Err(_) => IdentitySnapshot::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_is_visible_through_clones() {
        let source = SharedIdentitySource::new();
        let reader = source.clone();

        source.publish(IdentitySnapshot::empty().with_tenant("t1"));
        assert_eq!(
            reader.snapshot().tenant_id.map(|t| t.into_inner()),
            Some("t1".to_string())
        );

        source.clear();
        assert_eq!(reader.snapshot(), IdentitySnapshot::empty());
    }

    #[test]
    fn poisoned_lock_reads_as_empty_snapshot() {
        let source =
            SharedIdentitySource::with_snapshot(IdentitySnapshot::empty().with_tenant("t1"));
        let inner = Arc::clone(&source.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.write().unwrap();
            panic!("writer panicked while holding the identity lock");
        })
        .join();

        assert!(source.inner.is_poisoned());
        assert_eq!(source.snapshot(), IdentitySnapshot::empty());

        // Publishing into a poisoned cell is dropped, not a panic.
        source.publish(IdentitySnapshot::empty().with_tenant("t2"));
        assert_eq!(source.snapshot(), IdentitySnapshot::empty());
    }

    #[test]
    fn arc_and_ref_forward() {
        let source = Arc::new(SharedIdentitySource::with_snapshot(
            IdentitySnapshot::empty().with_admin(true),
        ));
        assert!(source.snapshot().is_admin);
        assert!((&*source).snapshot().is_admin);
    }
}
