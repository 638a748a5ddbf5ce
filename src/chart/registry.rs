//! Chart Registry - scoped ownership of per-canvas chart instances
//!
//! Each rendered chart occupies one named canvas slot. The registry owns at
//! most one live handle per slot: acquiring a slot retires whatever handle
//! currently holds it before the new one goes live, so a redraw is always
//! destroy-then-create. Dropping a live handle releases its slot.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

#[derive(Default)]
struct SlotTable {
    /// Slot name → generation of the live handle
    live: FxHashMap<String, u64>,
    next_generation: u64,
}

/// Registry of canvas slots, shared across renders.
#[derive(Clone, Default)]
pub struct ChartRegistry {
    slots: Arc<Mutex<SlotTable>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a canvas slot.
    ///
    /// Any handle currently live on the slot is retired first; it stays a
    /// valid value but no longer owns the slot. The returned handle is the
    /// slot's sole live owner until it is dropped or replaced.
    pub fn acquire(&self, slot: &str) -> ChartHandle {
        let mut table = lock(&self.slots);
        table.live.remove(slot);

        table.next_generation += 1;
        let generation = table.next_generation;
        table.live.insert(slot.to_string(), generation);

        ChartHandle {
            slots: Arc::clone(&self.slots),
            slot: slot.to_string(),
            generation,
        }
    }

    /// Number of slots with a live handle.
    pub fn live_count(&self) -> usize {
        lock(&self.slots).live.len()
    }
}

/// Owner of one canvas slot for the lifetime of a rendered chart.
pub struct ChartHandle {
    slots: Arc<Mutex<SlotTable>>,
    slot: String,
    generation: u64,
}

impl ChartHandle {
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Whether this handle still owns its slot.
    pub fn is_live(&self) -> bool {
        lock(&self.slots).live.get(&self.slot) == Some(&self.generation)
    }
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        let mut table = lock(&self.slots);
        if table.live.get(&self.slot) == Some(&self.generation) {
            table.live.remove(&self.slot);
        }
    }
}

fn lock(slots: &Mutex<SlotTable>) -> std::sync::MutexGuard<'_, SlotTable> {
    slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_grants_live_handle() {
        let registry = ChartRegistry::new();
        let handle = registry.acquire("confidence-chart");
        assert!(handle.is_live());
        assert_eq!(handle.slot(), "confidence-chart");
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_reacquire_retires_previous_handle() {
        let registry = ChartRegistry::new();
        let first = registry.acquire("confidence-chart");
        let second = registry.acquire("confidence-chart");

        assert!(!first.is_live());
        assert!(second.is_live());
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_drop_releases_slot() {
        let registry = ChartRegistry::new();
        {
            let _handle = registry.acquire("conditions-chart");
            assert_eq!(registry.live_count(), 1);
        }
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_dropping_retired_handle_keeps_live_owner() {
        let registry = ChartRegistry::new();
        let first = registry.acquire("confidence-chart");
        let second = registry.acquire("confidence-chart");

        drop(first);
        assert!(second.is_live());
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_slots_are_independent() {
        let registry = ChartRegistry::new();
        let confidence = registry.acquire("confidence-chart");
        let conditions = registry.acquire("conditions-chart");

        assert!(confidence.is_live());
        assert!(conditions.is_live());
        assert_eq!(registry.live_count(), 2);

        drop(confidence);
        assert!(conditions.is_live());
        assert_eq!(registry.live_count(), 1);
    }
}
