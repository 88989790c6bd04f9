//! Layer id generation
//!
//! Derived layers need fresh ids that cannot collide with anything already
//! in the store. Generation is a capability passed in by the caller rather
//! than a global, so tests and command-line runs can pin deterministic ids
//! while interactive sessions use random UUIDs.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::layer::LayerId;

/// Source of fresh layer ids.
pub trait IdGenerator: Send + Sync {
    /// Returns an id this generator has never returned before.
    fn next_id(&self) -> LayerId;
}

/// Generates random version-4 UUID ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    /// Creates a UUID generator.
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> LayerId {
        LayerId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Generates `layer-0`, `layer-1`, ... from a per-instance counter.
///
/// Deterministic, so tests can assert on the exact ids of derived layers.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator starting at `layer-0`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> LayerId {
        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        LayerId::new(format!("layer-{}", count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_generator_produces_distinct_ids() {
        let generator = UuidIdGenerator;
        assert_ne!(generator.next_id(), generator.next_id());
    }

    #[test]
    fn test_sequential_generator_counts_from_zero() {
        let generator = SequentialIdGenerator::new();
        assert_eq!(generator.next_id(), LayerId::new("layer-0"));
        assert_eq!(generator.next_id(), LayerId::new("layer-1"));
        assert_eq!(generator.next_id(), LayerId::new("layer-2"));
    }

    #[test]
    fn test_separate_sequential_generators_are_independent() {
        let first = SequentialIdGenerator::new();
        let second = SequentialIdGenerator::new();
        first.next_id();

        assert_eq!(second.next_id(), LayerId::new("layer-0"));
    }
}
