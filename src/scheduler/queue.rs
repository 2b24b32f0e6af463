/*!
 * Scheduling Queue
 * One ready queue driven by a single policy, advanced one tick at a time
 */

use super::policy::Policy;
use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::Pid;
use crate::process::Process;
use std::collections::VecDeque;
use tracing::trace;

/// Ready queue for one priority level
///
/// The front member is the selected process. Members are only reordered when
/// an SJF queue admits a process and when a round-robin quantum expires.
#[derive(Debug, Clone)]
pub struct SchedulingQueue {
    policy: Policy,
    members: VecDeque<Process>,
    running: bool,
    ticks_since_switch: u64,
}

impl SchedulingQueue {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            members: VecDeque::new(),
            running: false,
            ticks_since_switch: 0,
        }
    }

    /// Build a queue from a policy name and its optional parameters
    pub fn from_parts(
        name: &str,
        preemptive: Option<bool>,
        quantum: Option<u64>,
    ) -> SchedulerResult<Self> {
        Policy::from_parts(name, preemptive, quantum).map(Self::new)
    }

    /// Append a process; SJF queues re-sort by remaining time
    pub fn admit(&mut self, process: Process) {
        let was_idle = self.members.is_empty();
        self.members.push_back(process);

        if let Policy::ShortestJobFirst { preemptive } = self.policy {
            // An idle non-preemptive queue commits to the first process it receives
            if was_idle && !preemptive {
                self.running = true;
            }

            let start = if self.running && !preemptive { 1 } else { 0 };
            self.sort_from(start);
        }
    }

    /// Stable ascending sort of `members[start..]` by remaining time
    fn sort_from(&mut self, start: usize) {
        if start >= self.members.len() {
            return;
        }
        self.members.make_contiguous()[start..].sort_by_key(Process::remaining);
    }

    /// Execute the front process for one tick
    ///
    /// Returns `true` when the front process completed and was removed.
    pub fn advance_one_tick(&mut self) -> SchedulerResult<bool> {
        let quantum = self.policy.quantum();
        let front = self.members.front_mut().ok_or(SchedulerError::Empty)?;

        self.running = true;
        front.execute_tick();

        if front.is_complete() {
            let pid = front.pid();
            self.members.pop_front();
            match self.policy {
                Policy::ShortestJobFirst { .. } => self.running = false,
                Policy::RoundRobin { .. } => self.ticks_since_switch = 0,
                Policy::Fcfs => {}
            }
            trace!(%pid, policy = %self.policy, "process left queue");
            return Ok(true);
        }

        if let Some(quantum) = quantum {
            self.ticks_since_switch += 1;
            if self.ticks_since_switch >= quantum {
                self.members.rotate_left(1);
                self.ticks_since_switch = 0;
            }
        }

        Ok(false)
    }

    /// Id of the selected (front) process
    pub fn current_process_id(&self) -> SchedulerResult<Pid> {
        self.members
            .front()
            .map(Process::pid)
            .ok_or(SchedulerError::Empty)
    }

    /// Number of queued processes, including the running one
    #[inline]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Whether the front process has been selected
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Members from front to back
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn proc(pid: u64, burst: u64) -> Process {
        Process::new(Pid(pid), burst).unwrap()
    }

    fn order(queue: &SchedulingQueue) -> Vec<u64> {
        queue.iter().map(|p| p.pid().0).collect()
    }

    #[test]
    fn test_fcfs_keeps_arrival_order() {
        let mut queue = SchedulingQueue::new(Policy::Fcfs);
        queue.admit(proc(1, 5));
        queue.admit(proc(2, 1));
        assert_eq!(order(&queue), vec![1, 2]);

        for _ in 0..4 {
            assert!(!queue.advance_one_tick().unwrap());
        }
        assert!(queue.advance_one_tick().unwrap());
        assert_eq!(queue.current_process_id().unwrap(), Pid(2));
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = SchedulingQueue::new(Policy::Fcfs);
        assert_eq!(queue.current_process_id(), Err(SchedulerError::Empty));
        assert_eq!(queue.advance_one_tick(), Err(SchedulerError::Empty));
        assert_eq!(queue.count(), 0);
    }

    #[test]
    fn test_sjf_idle_queue_commits_to_first_arrival() {
        let mut queue = SchedulingQueue::new(Policy::SJF);
        queue.admit(proc(1, 5));
        queue.admit(proc(2, 2));
        assert!(queue.is_running());
        assert_eq!(order(&queue), vec![1, 2]);
    }

    #[test]
    fn test_sjf_sorts_waiting_members() {
        let mut queue = SchedulingQueue::new(Policy::SJF);
        queue.admit(proc(1, 5));
        queue.admit(proc(2, 4));
        queue.admit(proc(3, 2));
        queue.admit(proc(4, 4));
        // Front stays, the rest sorted stably
        assert_eq!(order(&queue), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_sjf_reprioritizes_after_completion() {
        let mut queue = SchedulingQueue::new(Policy::SJF);
        queue.admit(proc(1, 1));
        queue.admit(proc(2, 4));
        assert!(queue.advance_one_tick().unwrap());
        assert!(!queue.is_running());

        // Next front not selected yet, so a shorter arrival takes its place
        queue.admit(proc(3, 2));
        assert_eq!(order(&queue), vec![3, 2]);
    }

    #[test]
    fn test_preemptive_sjf_overtakes_running() {
        let mut queue = SchedulingQueue::new(Policy::SRTF);
        queue.admit(proc(1, 5));
        queue.advance_one_tick().unwrap();
        queue.admit(proc(2, 2));
        assert_eq!(queue.current_process_id().unwrap(), Pid(2));
        assert_eq!(order(&queue), vec![2, 1]);
    }

    #[test]
    fn test_preemptive_sjf_ties_keep_order() {
        let mut queue = SchedulingQueue::new(Policy::SRTF);
        queue.admit(proc(1, 3));
        queue.admit(proc(2, 3));
        assert_eq!(order(&queue), vec![1, 2]);
    }

    #[test]
    fn test_round_robin_rotates_on_quantum() {
        let mut queue = SchedulingQueue::new(Policy::RoundRobin { quantum: 2 });
        queue.admit(proc(1, 3));
        queue.admit(proc(2, 3));

        let mut ran = Vec::new();
        while queue.count() > 0 {
            ran.push(queue.current_process_id().unwrap().0);
            queue.advance_one_tick().unwrap();
        }
        assert_eq!(ran, vec![1, 1, 2, 2, 1, 2]);
    }

    #[test]
    fn test_round_robin_single_member_rotation_is_noop() {
        let mut queue = SchedulingQueue::new(Policy::RoundRobin { quantum: 2 });
        queue.admit(proc(1, 5));

        let mut ticks = 0;
        while !queue.advance_one_tick().unwrap() {
            ticks += 1;
            assert_eq!(queue.current_process_id().unwrap(), Pid(1));
        }
        assert_eq!(ticks + 1, 5);
    }

    #[test]
    fn test_round_robin_successor_gets_full_quantum() {
        let mut queue = SchedulingQueue::new(Policy::RoundRobin { quantum: 2 });
        queue.admit(proc(1, 1));
        queue.admit(proc(2, 3));

        assert!(queue.advance_one_tick().unwrap());
        assert!(!queue.advance_one_tick().unwrap());
        // Still process 2: one tick used of a fresh quantum
        assert_eq!(queue.current_process_id().unwrap(), Pid(2));
    }

    #[test]
    fn test_from_parts_propagates_errors() {
        assert!(matches!(
            SchedulingQueue::from_parts("rr", None, None),
            Err(SchedulerError::InvalidParameter(_))
        ));
        assert!(matches!(
            SchedulingQueue::from_parts("edf", None, None),
            Err(SchedulerError::UnsupportedPolicy(_))
        ));
        assert_eq!(
            SchedulingQueue::from_parts("rr", None, Some(3))
                .unwrap()
                .policy(),
            Policy::RoundRobin { quantum: 3 }
        );
    }
}
