/*!
 * Scheduler Core Operations
 * Insert, tick, and completion checks
 */

use super::stats::ProcessStats;
use super::{Scheduler, SchedulingQueue, TickOutcome};
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Pid, Priority, Tick};
use crate::process::Process;
use tracing::{debug, trace};

impl Scheduler {
    /// True when every queue is empty
    pub fn finished(&self) -> bool {
        self.queues.iter().all(|queue| queue.count() == 0)
    }

    /// Admit a process at a priority level and start tracking it
    pub fn insert(&mut self, process: Process, priority: Priority) -> SchedulerResult<()> {
        let levels = self.queues.len();
        let queue = self
            .queues
            .get_mut(priority)
            .ok_or(SchedulerError::InvalidPriority { priority, levels })?;

        let pid = process.pid();
        let burst = process.burst();
        if self.index.contains_key(&pid) {
            return Err(SchedulerError::DuplicateProcess(pid));
        }

        let record = ProcessStats::new(pid, priority, burst, self.clock);
        queue.admit(process);

        self.index.insert(pid, self.records.len());
        self.records.push(record);

        debug!(%pid, priority, burst, clock = self.clock, "Process admitted");
        Ok(())
    }

    /// Advance simulated time by one tick
    ///
    /// A tick at clock `c` covers the interval `[c - 1, c)`. Only the
    /// priority-0 queue executes.
    pub fn tick(&mut self) -> TickOutcome {
        let clock = self.clock;
        let outcome = self.step(clock);

        self.counters.ticks += 1;
        match outcome {
            TickOutcome::Idle => self.counters.idle_ticks += 1,
            TickOutcome::Held { .. } => self.counters.held_ticks += 1,
            TickOutcome::Ran { .. } => self.counters.busy_ticks += 1,
        }

        trace!(clock, ?outcome, "Tick");
        self.clock += 1;
        outcome
    }

    fn step(&mut self, clock: Tick) -> TickOutcome {
        if clock < 1 {
            return TickOutcome::Idle;
        }

        let running = match self.queues.first().map(SchedulingQueue::current_process_id) {
            Some(Ok(pid)) => pid,
            _ => return TickOutcome::Idle,
        };

        // Selected process arrived this instant: it was not present during [c - 1, c)
        if self.arrival_of(running) == Some(clock) {
            self.account(clock, None);
            return TickOutcome::Held { pid: running };
        }

        let completed = match self.queues.first_mut().map(SchedulingQueue::advance_one_tick) {
            Some(Ok(completed)) => completed,
            _ => return TickOutcome::Idle,
        };

        self.note_switch(running);
        self.account(clock, Some((running, completed)));

        if completed {
            self.counters.completed += 1;
            debug!(pid = %running, clock, "Process completed");
        }

        TickOutcome::Ran {
            pid: running,
            completed,
        }
    }

    fn arrival_of(&self, pid: Pid) -> Option<Tick> {
        self.index
            .get(&pid)
            .map(|&slot| self.records[slot].arrival_time)
    }

    fn note_switch(&mut self, running: Pid) {
        if let Some(previous) = self.last_ran.replace(running) {
            if previous != running {
                self.counters.context_switches += 1;

                let previous_done = self
                    .index
                    .get(&previous)
                    .map_or(true, |&slot| self.records[slot].is_finished());
                if !previous_done {
                    self.counters.preemptions += 1;
                    trace!(from = %previous, to = %running, "Preempted");
                }
            }
        }
    }

    /// Charge one tick to every unfinished process present during `[c - 1, c)`
    fn account(&mut self, clock: Tick, running: Option<(Pid, bool)>) {
        let present = self
            .records
            .iter_mut()
            .filter(|record| !record.is_finished() && record.arrival_time < clock);

        for record in present {
            match running {
                Some((pid, completed)) if record.pid == pid => {
                    if record.response_time.is_none() {
                        record.response_time = Some(clock - 1 - record.arrival_time);
                    }
                    if completed {
                        record.turnaround_time = Some(clock - record.arrival_time);
                    }
                }
                _ => record.waiting_time += 1,
            }
        }
    }
}
