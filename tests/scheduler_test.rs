/*!
 * Scheduler Tests
 * Timing behavior of each policy through the public scheduler API
 */

use cpu_sched_sim::{Pid, Policy, Process, Scheduler, SchedulerError, Tick, TickOutcome};
use pretty_assertions::assert_eq;

/// Insert `(arrival, burst)` records (ids 1, 2, ... in order) and run to completion.
/// Returns the pid executed at each busy tick.
fn simulate(scheduler: &mut Scheduler, arrivals: &[(Tick, Tick)]) -> Vec<u64> {
    let horizon = arrivals.iter().map(|&(a, _)| a + 1).max().unwrap_or(0);
    let mut ran = Vec::new();
    let mut now = 0;

    while !scheduler.finished() || now < horizon {
        for (idx, &(arrival, burst)) in arrivals.iter().enumerate() {
            if arrival == now {
                let process = Process::new(Pid(idx as u64 + 1), burst).unwrap();
                scheduler.insert(process, 0).unwrap();
            }
        }
        if let TickOutcome::Ran { pid, .. } = scheduler.tick() {
            ran.push(pid.0);
        }
        now += 1;
    }

    ran
}

/// (finish tick, turnaround, response, waiting)
fn timings(scheduler: &Scheduler, pid: u64) -> (Tick, Tick, Tick, Tick) {
    let stats = scheduler.process_stats(Pid(pid)).unwrap();
    (
        stats.completion_time().unwrap(),
        stats.turnaround_time.unwrap(),
        stats.response_time.unwrap(),
        stats.waiting_time,
    )
}

#[test]
fn test_fcfs_two_processes() {
    let mut scheduler = Scheduler::single(Policy::Fcfs);
    let ran = simulate(&mut scheduler, &[(0, 3), (0, 5)]);

    assert_eq!(ran, vec![1, 1, 1, 2, 2, 2, 2, 2]);
    assert_eq!(timings(&scheduler, 1), (3, 3, 0, 0));
    assert_eq!(timings(&scheduler, 2), (8, 8, 3, 3));
}

#[test]
fn test_non_preemptive_sjf_keeps_first_selection() {
    let mut scheduler = Scheduler::single(Policy::SJF);
    let ran = simulate(&mut scheduler, &[(0, 5), (0, 2)]);

    assert_eq!(ran, vec![1, 1, 1, 1, 1, 2, 2]);
    assert_eq!(timings(&scheduler, 1).0, 5);
    assert_eq!(timings(&scheduler, 2).0, 7);
}

#[test]
fn test_non_preemptive_sjf_picks_shortest_waiting() {
    let mut scheduler = Scheduler::single(Policy::SJF);
    let ran = simulate(&mut scheduler, &[(0, 3), (1, 4), (1, 1), (2, 2)]);

    assert_eq!(ran, vec![1, 1, 1, 3, 4, 4, 2, 2, 2, 2]);
}

#[test]
fn test_preemptive_sjf_shorter_arrival_overtakes() {
    let mut scheduler = Scheduler::single(Policy::SRTF);
    let ran = simulate(&mut scheduler, &[(0, 5), (2, 1)]);

    // Process 2 is held on its arrival tick, then runs before 1 resumes
    assert_eq!(ran, vec![1, 2, 1, 1, 1, 1]);
    let (finish, turnaround, response, waiting) = timings(&scheduler, 2);
    assert_eq!((finish, turnaround, response, waiting), (3, 1, 0, 0));
    assert_eq!(scheduler.counters().preemptions, 1);
}

#[test]
fn test_round_robin_single_process() {
    let mut scheduler = Scheduler::single(Policy::RoundRobin { quantum: 2 });
    let ran = simulate(&mut scheduler, &[(0, 5)]);

    assert_eq!(ran.len(), 5);
    assert_eq!(timings(&scheduler, 1), (5, 5, 0, 0));
}

#[test]
fn test_round_robin_alternates_slices() {
    let mut scheduler = Scheduler::single(Policy::RoundRobin { quantum: 2 });
    let ran = simulate(&mut scheduler, &[(0, 3), (0, 3)]);

    assert_eq!(ran, vec![1, 1, 2, 2, 1, 2]);
    let (a_finish, _, _, a_waiting) = timings(&scheduler, 1);
    let (b_finish, _, _, b_waiting) = timings(&scheduler, 2);
    assert_eq!((a_finish, b_finish), (5, 6));
    assert_eq!((a_waiting, b_waiting), (2, 3));
}

#[test]
fn test_finished_is_idempotent() {
    let mut scheduler = Scheduler::single(Policy::Fcfs);
    assert!(scheduler.finished());
    assert!(scheduler.finished());

    scheduler.insert(Process::new(Pid(1), 2).unwrap(), 0).unwrap();
    for _ in 0..3 {
        assert!(!scheduler.finished());
    }
}

#[test]
fn test_finalized_records_are_write_once() {
    let mut scheduler = Scheduler::single(Policy::Fcfs);
    simulate(&mut scheduler, &[(0, 2)]);
    let sealed = scheduler.process_stats(Pid(1)).cloned().unwrap();

    // Later insertions and ticks leave the sealed record alone
    scheduler.insert(Process::new(Pid(2), 3).unwrap(), 0).unwrap();
    while !scheduler.finished() {
        scheduler.tick();
    }
    assert_eq!(scheduler.process_stats(Pid(1)), Some(&sealed));
    assert_eq!(
        scheduler.insert(Process::new(Pid(1), 1).unwrap(), 0),
        Err(SchedulerError::DuplicateProcess(Pid(1)))
    );
}

#[test]
fn test_gap_between_arrivals() {
    let mut scheduler = Scheduler::single(Policy::Fcfs);
    let ran = simulate(&mut scheduler, &[(0, 1), (5, 2)]);

    // Process 2 lands on an idle CPU: held on its arrival tick, then runs straight through
    assert_eq!(ran, vec![1, 2, 2]);
    assert_eq!(timings(&scheduler, 2), (7, 2, 0, 0));
    assert_eq!(scheduler.counters().held_ticks, 1);
}

#[test]
fn test_averages() {
    let mut scheduler = Scheduler::single(Policy::Fcfs);
    simulate(&mut scheduler, &[(0, 3), (0, 5)]);

    let avg = scheduler.averages();
    assert_eq!(avg.turnaround_time, 5.5);
    assert_eq!(avg.response_time, 1.5);
    assert_eq!(avg.waiting_time, 1.5);
}

#[test]
fn test_construction_errors_propagate() {
    assert!(matches!(
        Scheduler::from_names(&["fcfs", "lottery"], &[]),
        Err(SchedulerError::UnsupportedPolicy(name)) if name == "lottery"
    ));
    assert!(matches!(
        Scheduler::from_names(&["sjf", "rr"], &[]),
        Err(SchedulerError::InvalidParameter(_))
    ));
    assert!(matches!(
        Scheduler::from_names(&["rr"], &[0]),
        Err(SchedulerError::InvalidParameter(_))
    ));
}
