//! The single slot naming the charm that owns the active gesture.
//!
//! A press always claims the slot, replacing any previous holder. The slot
//! is released when a session resolves closed, on tap-cancel, and by the
//! programmatic `open`/`close`. Panels live on the UI thread, so the slot is
//! thread-local.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CHARM_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static ACTIVE_CHARM: Cell<Option<CharmId>> = const { Cell::new(None) };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharmId(u64);

impl CharmId {
    pub fn next() -> Self {
        Self(NEXT_CHARM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CharmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "charm#{}", self.0)
    }
}

/// Make `id` the holder. Returns the charm it displaced, if any.
pub fn claim(id: CharmId) -> Option<CharmId> {
    let previous = ACTIVE_CHARM.with(|slot| slot.replace(Some(id)));
    if let Some(previous) = previous.filter(|previous| *previous != id) {
        log::debug!("{id} takes exclusivity from {previous}");
    }
    previous
}

/// Empty the slot if `id` holds it. Returns whether it did.
pub fn release(id: CharmId) -> bool {
    // Also reached from `Drop`, possibly during thread teardown.
    ACTIVE_CHARM
        .try_with(|slot| {
            if slot.get() == Some(id) {
                slot.set(None);
                true
            } else {
                false
            }
        })
        .unwrap_or(false)
}

pub fn holder() -> Option<CharmId> {
    ACTIVE_CHARM.with(Cell::get)
}

pub fn is_held_by(id: CharmId) -> bool {
    holder() == Some(id)
}

/// Empty the slot regardless of holder.
pub fn clear() {
    ACTIVE_CHARM.with(|slot| slot.set(None));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_claim_wins() {
        clear();
        let first = CharmId::next();
        let second = CharmId::next();
        assert_eq!(claim(first), None);
        assert_eq!(claim(second), Some(first));
        assert_eq!(holder(), Some(second));
    }

    #[test]
    fn only_the_holder_releases() {
        clear();
        let holder_id = CharmId::next();
        let other = CharmId::next();
        claim(holder_id);
        assert!(!release(other));
        assert!(is_held_by(holder_id));
        assert!(release(holder_id));
        assert_eq!(holder(), None);
    }
}
