use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out ids for new lists and todos.
///
/// Implementations must never return the same id twice within one process.
/// The counter itself is not persisted. Instead, every stored session that
/// is loaded reports its highest id through [`IdAllocator::observe`], so a
/// restarted process never hands out an id that session already uses.
pub trait IdAllocator: Send + Sync {
    fn next_id(&self) -> u64;

    /// Make sure every later id is greater than `max_id`.
    fn observe(&self, max_id: u64);
}

/// Process-wide monotonic counter shared by lists and todos.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    fn observe(&self, max_id: u64) {
        self.next.fetch_max(max_id.saturating_add(1), Ordering::Relaxed);
    }
}
