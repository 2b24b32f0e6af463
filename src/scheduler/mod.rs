/*!
 * CPU Scheduler
 * Tick-driven single-processor scheduler with per-process timing statistics
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Pid, Tick};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

mod operations;
pub mod policy;
pub mod queue;
pub mod stats;

pub use policy::{Policy, PolicyKind};
pub use queue::SchedulingQueue;
pub use stats::{AverageTimes, ProcessStats, SchedulerCounters};

/// What a call to `tick` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TickOutcome {
    /// Nothing to run (first tick, or empty priority-0 queue)
    Idle,
    /// The selected process arrived this instant and was not executed yet
    Held { pid: Pid },
    /// The selected process executed for one tick
    Ran { pid: Pid, completed: bool },
}

/// CPU Scheduler
///
/// Owns one queue per priority level, the simulation clock and a statistics
/// record for every process it has ever been given. Only the priority-0 queue
/// is advanced by `tick`; other levels accept processes but never run them.
#[derive(Debug, Clone)]
pub struct Scheduler {
    queues: Vec<SchedulingQueue>,
    clock: Tick,

    // Statistics in insertion order, with a pid -> slot index
    records: Vec<ProcessStats>,
    index: AHashMap<Pid, usize>,

    counters: SchedulerCounters,
    last_ran: Option<Pid>,
}

impl Scheduler {
    /// Create a scheduler with one queue per policy, in priority order
    pub fn new(policies: impl IntoIterator<Item = Policy>) -> SchedulerResult<Self> {
        let queues: Vec<SchedulingQueue> = policies.into_iter().map(SchedulingQueue::new).collect();
        if queues.is_empty() {
            return Err(SchedulerError::InvalidParameter(
                "a scheduler needs at least one queue".into(),
            ));
        }

        Ok(Self::with_queues(queues))
    }

    /// Single-level scheduler
    pub fn single(policy: Policy) -> Self {
        Self::with_queues(vec![SchedulingQueue::new(policy)])
    }

    fn with_queues(queues: Vec<SchedulingQueue>) -> Self {
        info!(
            levels = queues.len(),
            policy = %queues[0].policy(),
            "Scheduler initialized"
        );

        Self {
            queues,
            clock: 0,
            records: Vec::new(),
            index: AHashMap::new(),
            counters: SchedulerCounters::default(),
            last_ran: None,
        }
    }

    /// Create a scheduler from policy names, one per priority level
    ///
    /// `quanta` are consumed in order by the round-robin levels; a missing or
    /// leftover quantum is an `InvalidParameter` error.
    pub fn from_names<S: AsRef<str>>(names: &[S], quanta: &[u64]) -> SchedulerResult<Self> {
        let mut quanta = quanta.iter().copied();
        let mut policies = Vec::with_capacity(names.len());

        for (level, name) in names.iter().enumerate() {
            let name = name.as_ref();
            let quantum = match PolicyKind::parse(name)? {
                PolicyKind::RoundRobin => Some(quanta.next().ok_or_else(|| {
                    SchedulerError::InvalidParameter(format!(
                        "round-robin queue at priority {} has no quantum",
                        level
                    ))
                })?),
                _ => None,
            };
            policies.push(Policy::from_parts(name, None, quantum)?);
        }

        let leftover = quanta.count();
        if leftover > 0 {
            return Err(SchedulerError::InvalidParameter(format!(
                "{} quantum value(s) left without a round-robin queue",
                leftover
            )));
        }

        Self::new(policies)
    }

    /// Current simulated time
    #[inline]
    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Number of priority levels
    #[inline]
    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    /// Queue at a priority level
    pub fn queue(&self, priority: usize) -> Option<&SchedulingQueue> {
        self.queues.get(priority)
    }
}
