use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Page scroll lock shared by every overlay.
///
/// Counts open overlays: the page locks on 0→1 and unlocks on 1→0.
/// Each [`ScrollLockGuard`] releases its hold exactly once, on drop.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        let previous = self.holders.fetch_add(1, Ordering::AcqRel);
        if previous == 0 {
            tracing::debug!("page scroll locked");
        }
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::Acquire)
    }
}

/// One overlay's hold on the scroll lock.
#[derive(Debug)]
#[must_use = "dropping the guard releases the scroll lock"]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let previous = self.holders.fetch_sub(1, Ordering::AcqRel);
        if previous == 1 {
            tracing::debug!("page scroll released");
        }
    }
}
