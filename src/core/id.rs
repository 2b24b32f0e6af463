/*!
 * ID Generation
 * Type-safe process identifiers and the generators that hand them out
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process ID
///
/// Opaque to the scheduler: it only relies on ids being unique and stable for
/// the lifetime of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(pub u64);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Pid {
    fn from(raw: u64) -> Self {
        Pid(raw)
    }
}

/// Generic process id generator interface
pub trait IdGenerator {
    /// Generate next ID
    fn next(&self) -> Pid;

    /// Value the next call to `next` will return (for debugging)
    fn current(&self) -> Pid;
}

/// Monotonic atomic counter
///
/// Ids are handed out in call order, so a run that spawns processes in the same
/// order always gets the same ids. Clones share the counter.
#[derive(Debug)]
pub struct SequentialGenerator {
    counter: Arc<AtomicU64>,
}

impl SequentialGenerator {
    /// Create new generator starting at given value
    #[inline]
    pub fn new(start: u64) -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(start)),
        }
    }
}

impl Default for SequentialGenerator {
    /// Generator starting at 1
    fn default() -> Self {
        Self::new(1)
    }
}

impl Clone for SequentialGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
        }
    }
}

impl IdGenerator for SequentialGenerator {
    #[inline]
    fn next(&self) -> Pid {
        Pid(self.counter.fetch_add(1, Ordering::SeqCst))
    }

    #[inline]
    fn current(&self) -> Pid {
        Pid(self.counter.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let gen = SequentialGenerator::default();
        assert_eq!(gen.next(), Pid(1));
        assert_eq!(gen.next(), Pid(2));
        assert_eq!(gen.current(), Pid(3));
    }

    #[test]
    fn test_clones_share_counter() {
        let gen = SequentialGenerator::new(10);
        let other = gen.clone();
        assert_eq!(gen.next(), Pid(10));
        assert_eq!(other.next(), Pid(11));
    }

    #[test]
    fn test_pid_serializes_transparently() {
        let json = serde_json::to_string(&Pid(42)).unwrap();
        assert_eq!(json, "42");
    }
}
