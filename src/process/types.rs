/*!
 * Process Types
 * CPU-bound process as seen by the scheduler
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Serialize};

/// A CPU-bound process with a fixed identity and a shrinking burst
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProcessRecord")]
pub struct Process {
    pid: Pid,
    burst: Tick,
    remaining: Tick,
}

impl Process {
    /// Create a process that needs `burst` ticks of CPU time
    ///
    /// Fails with `InvalidParameter` when `burst` is zero.
    pub fn new(pid: Pid, burst: Tick) -> SchedulerResult<Self> {
        if burst == 0 {
            return Err(SchedulerError::InvalidParameter(format!(
                "process {} must have a positive burst time",
                pid
            )));
        }

        Ok(Self {
            pid,
            burst,
            remaining: burst,
        })
    }

    #[inline]
    #[must_use]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// CPU burst requested at creation
    #[inline]
    #[must_use]
    pub const fn burst(&self) -> Tick {
        self.burst
    }

    /// CPU time still needed before completion
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> Tick {
        self.remaining
    }

    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Run the process for one tick
    #[inline]
    pub(crate) fn execute_tick(&mut self) {
        debug_assert!(self.remaining > 0, "executing a completed process");
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Unvalidated wire form of a `Process`
#[derive(Deserialize)]
struct ProcessRecord {
    pid: Pid,
    burst: Tick,
    remaining: Option<Tick>,
}

impl TryFrom<ProcessRecord> for Process {
    type Error = SchedulerError;

    fn try_from(record: ProcessRecord) -> SchedulerResult<Self> {
        let mut process = Process::new(record.pid, record.burst)?;
        if let Some(remaining) = record.remaining {
            if remaining == 0 || remaining > process.burst {
                return Err(SchedulerError::InvalidParameter(format!(
                    "process {} has remaining time {} outside 1..={}",
                    process.pid, remaining, process.burst
                )));
            }
            process.remaining = remaining;
        }
        Ok(process)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_burst_rejected() {
        let err = Process::new(Pid(1), 0).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidParameter(_)));
    }

    #[test]
    fn test_execute_tick_counts_down() {
        let mut proc = Process::new(Pid(7), 2).unwrap();
        proc.execute_tick();
        assert_eq!(proc.remaining(), 1);
        assert!(!proc.is_complete());
        proc.execute_tick();
        assert!(proc.is_complete());
        assert_eq!(proc.burst(), 2);
        assert_eq!(proc.pid(), Pid(7));
    }

    #[test]
    fn test_deserialize_validates() {
        let process: Process =
            serde_json::from_str(r#"{"pid":1,"burst":4,"remaining":2}"#).unwrap();
        assert_eq!(process.remaining(), 2);

        let fresh: Process = serde_json::from_str(r#"{"pid":2,"burst":3}"#).unwrap();
        assert_eq!(fresh, Process::new(Pid(2), 3).unwrap());

        assert!(serde_json::from_str::<Process>(r#"{"pid":1,"burst":0,"remaining":0}"#).is_err());
        assert!(serde_json::from_str::<Process>(r#"{"pid":1,"burst":2,"remaining":0}"#).is_err());
        assert!(serde_json::from_str::<Process>(r#"{"pid":1,"burst":2,"remaining":5}"#).is_err());
    }
}
