//! Process-wide owner lookup cache.
//!
//! # Responsibility
//! - Memoize resolved owners per area identity for the process lifetime.
//! - Keep cache access safe under concurrent requests.
//!
//! # Invariants
//! - Entries are never invalidated on the resolution path; `clear` exists
//!   for tests and operational resets only.
//! - Lookups probe only the hint slot. Scan results are stored under the
//!   scan slot and become reachable once the corrected hint routes a later
//!   resolution down the fast path.

use crate::model::area::AreaId;
use crate::owner::OwnerHandle;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Which resolution path produced a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheSlot {
    /// Result of the hint fast path.
    Hint,
    /// Result of the full candidate scan.
    Scan,
}

/// Mutex-guarded owner memoization keyed by `(slot, area identity)`.
///
/// Negative results are never stored: an ownerless area repeats its scan on
/// every resolution.
#[derive(Default)]
pub struct OwnerCache {
    entries: Mutex<HashMap<(CacheSlot, AreaId), OwnerHandle>>,
}

impl OwnerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached owner for the slot, when present.
    pub fn get(&self, slot: CacheSlot, area_uuid: AreaId) -> Option<OwnerHandle> {
        self.lock().get(&(slot, area_uuid)).cloned()
    }

    /// Stores one resolved owner under the slot.
    pub fn put(&self, slot: CacheSlot, area_uuid: AreaId, owner: OwnerHandle) {
        self.lock().insert((slot, area_uuid), owner);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every entry. Test/operational escape hatch.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(CacheSlot, AreaId), OwnerHandle>> {
        // A poisoned cache only means another request panicked mid-insert;
        // the map itself stays usable.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheSlot, OwnerCache};
    use crate::model::actor::Actor;
    use crate::owner::OwnerRecord;
    use std::sync::Arc;
    use uuid::Uuid;

    struct StubOwner {
        uuid: Uuid,
    }

    impl OwnerRecord for StubOwner {
        fn uuid(&self) -> Uuid {
            self.uuid
        }
        fn type_tag(&self) -> &str {
            "stub_page"
        }
        fn title(&self) -> &str {
            "Stub"
        }
        fn edit_link(&self) -> String {
            "/admin/stub".to_string()
        }
        fn can_edit(&self, _actor: &Actor) -> bool {
            false
        }
        fn can_view(&self, _actor: &Actor) -> bool {
            false
        }
    }

    #[test]
    fn slots_are_independent_for_one_area() {
        let cache = OwnerCache::new();
        let area = Uuid::new_v4();
        let owner = Arc::new(StubOwner {
            uuid: Uuid::new_v4(),
        });

        cache.put(CacheSlot::Scan, area, owner.clone());
        assert!(cache.get(CacheSlot::Hint, area).is_none());
        assert!(cache.get(CacheSlot::Scan, area).is_some());
    }

    #[test]
    fn put_get_clear_roundtrip() {
        let cache = OwnerCache::new();
        let area = Uuid::new_v4();
        let owner_uuid = Uuid::new_v4();
        cache.put(
            CacheSlot::Hint,
            area,
            Arc::new(StubOwner { uuid: owner_uuid }),
        );

        let hit = cache.get(CacheSlot::Hint, area).expect("cached owner");
        assert_eq!(hit.uuid(), owner_uuid);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
