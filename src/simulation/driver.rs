/*!
 * Simulation Driver
 * Feeds arrivals into independent schedulers and ticks them to completion
 */

use super::report::{LaneReport, SimulationReport};
use super::schedule::ArrivalSchedule;
use crate::config::SimConfig;
use crate::core::errors::{SimResult, SimulationError};
use crate::core::id::IdGenerator;
use crate::core::types::Tick;
use crate::monitoring::RunSpan;
use crate::scheduler::{Policy, Scheduler};
use tracing::{debug, info};

/// Priority level every arrival is inserted at
const ARRIVAL_PRIORITY: usize = 0;

/// One named scheduler inside a run
#[derive(Debug, Clone)]
pub struct Lane {
    label: String,
    scheduler: Scheduler,
}

impl Lane {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

/// A set of lanes run side by side over the same arrivals
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    lanes: Vec<Lane>,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// FCFS, SJF and RR lanes configured from `config`
    pub fn standard(config: &SimConfig) -> SimResult<Self> {
        let sjf = Policy::ShortestJobFirst {
            preemptive: config.sjf_preemptive,
        };
        let rr = Policy::round_robin(config.quantum)?;

        Ok(Self::new()
            .with_lane("FCFS", Scheduler::single(Policy::Fcfs))
            .with_lane("SJF", Scheduler::single(sjf))
            .with_lane("RR", Scheduler::single(rr)))
    }

    pub fn with_lane(mut self, label: impl Into<String>, scheduler: Scheduler) -> Self {
        self.lanes.push(Lane {
            label: label.into(),
            scheduler,
        });
        self
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    fn finished(&self) -> bool {
        self.lanes.iter().all(|lane| lane.scheduler.finished())
    }

    /// Run every lane until all arrivals have been fed and every lane drained
    ///
    /// Each arriving process gets one id and is cloned into every lane, so the
    /// lanes' reports describe the same processes.
    pub fn run(
        &mut self,
        schedule: &ArrivalSchedule,
        ids: &dyn IdGenerator,
    ) -> SimResult<SimulationReport> {
        let span = RunSpan::new(self.lanes.len(), schedule.len());
        let _entered = span.enter();

        let horizon = schedule.horizon();
        let limit = stall_limit(schedule);
        info!(
            lanes = self.lanes.len(),
            processes = schedule.len(),
            horizon,
            "Simulation started"
        );

        let mut now: Tick = 0;
        while !self.finished() || now < horizon {
            if now > limit {
                return Err(SimulationError::Stalled { tick: now });
            }

            let arrivals = schedule.spawn_at(now, ids)?;
            for lane in &mut self.lanes {
                for process in &arrivals {
                    lane.scheduler.insert(process.clone(), ARRIVAL_PRIORITY)?;
                }
            }

            for lane in &mut self.lanes {
                lane.scheduler.tick();
            }

            now += 1;
        }

        span.record_ticks(now);
        info!(ticks = now, "Simulation finished");

        Ok(self.report())
    }

    /// Snapshot of every lane's statistics
    pub fn report(&self) -> SimulationReport {
        let lanes = self
            .lanes
            .iter()
            .map(|lane| {
                let scheduler = &lane.scheduler;
                let averages = scheduler.averages();
                debug!(
                    lane = %lane.label,
                    response = averages.response_time,
                    turnaround = averages.turnaround_time,
                    waiting = averages.waiting_time,
                    "Lane averages"
                );
                LaneReport {
                    label: lane.label.clone(),
                    policy: scheduler
                        .queue(0)
                        .map(|queue| queue.policy())
                        .unwrap_or(Policy::Fcfs),
                    averages,
                    counters: scheduler.counters(),
                    processes: scheduler.all_process_stats().to_vec(),
                }
            })
            .collect();

        SimulationReport { lanes }
    }
}

/// Upper bound on the ticks a correct run can take
///
/// Every tick after the horizon either executes a process or holds one on its
/// arrival instant, and each process is held at most once.
fn stall_limit(schedule: &ArrivalSchedule) -> Tick {
    schedule
        .horizon()
        .saturating_add(schedule.total_burst())
        .saturating_add(schedule.len() as Tick)
        .saturating_add(1)
}
