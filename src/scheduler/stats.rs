/*!
 * Scheduler Statistics
 * Per-process timing records, activity counters, and run averages
 */

use super::Scheduler;
use crate::core::types::{Pid, Priority, Tick};
use serde::{Deserialize, Serialize};

/// Timing record of one process
///
/// Created when the process is inserted and only updated by `tick`. Each
/// optional field stays unset until the event it measures has happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub pid: Pid,
    pub priority: Priority,
    pub burst: Tick,
    pub arrival_time: Tick,
    /// Ticks from arrival until the first executed tick
    pub response_time: Option<Tick>,
    /// Ticks from arrival until completion; write-once
    pub turnaround_time: Option<Tick>,
    /// Ticks spent present but not executing
    pub waiting_time: Tick,
}

impl ProcessStats {
    pub(super) fn new(pid: Pid, priority: Priority, burst: Tick, arrival_time: Tick) -> Self {
        Self {
            pid,
            priority,
            burst,
            arrival_time,
            response_time: None,
            turnaround_time: None,
            waiting_time: 0,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.turnaround_time.is_some()
    }

    /// Tick at which the process completed
    #[inline]
    pub fn completion_time(&self) -> Option<Tick> {
        self.turnaround_time.map(|t| self.arrival_time + t)
    }
}

/// Aggregate activity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerCounters {
    pub ticks: u64,
    pub busy_ticks: u64,
    pub idle_ticks: u64,
    /// Ticks skipped because the selected process arrived that instant
    pub held_ticks: u64,
    pub context_switches: u64,
    pub preemptions: u64,
    pub completed: u64,
}

/// Mean timings over every tracked process
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageTimes {
    pub response_time: f64,
    pub turnaround_time: f64,
    pub waiting_time: f64,
}

impl AverageTimes {
    /// Means over `records`, all zero when there are none
    ///
    /// Sums are kept as integers and divided once, so the result does not
    /// depend on floating-point summation order.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ProcessStats>) -> Self {
        let (mut count, mut response, mut turnaround, mut waiting) = (0u64, 0u64, 0u64, 0u64);

        for record in records {
            count += 1;
            response += record.response_time.unwrap_or(0);
            turnaround += record.turnaround_time.unwrap_or(0);
            waiting += record.waiting_time;
        }

        if count == 0 {
            return Self::default();
        }

        let n = count as f64;
        Self {
            response_time: response as f64 / n,
            turnaround_time: turnaround as f64 / n,
            waiting_time: waiting as f64 / n,
        }
    }
}

impl Scheduler {
    /// Statistics record of one process
    pub fn process_stats(&self, pid: Pid) -> Option<&ProcessStats> {
        self.index.get(&pid).map(|&slot| &self.records[slot])
    }

    /// Every statistics record, in insertion order
    pub fn all_process_stats(&self) -> &[ProcessStats] {
        &self.records
    }

    /// Activity counters snapshot
    pub fn counters(&self) -> SchedulerCounters {
        self.counters
    }

    /// Average response, turnaround and waiting time over all tracked processes
    pub fn averages(&self) -> AverageTimes {
        AverageTimes::from_records(&self.records)
    }
}
