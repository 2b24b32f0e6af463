/*!
 * CPU Scheduling Simulator
 * Discrete-time single-processor scheduling with FCFS, SJF and round-robin queues
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{
    ConfigError, InputError, SchedulerError, SchedulerResult, SimResult, SimulationError,
};
pub use crate::core::id::{IdGenerator, SequentialGenerator};
pub use crate::core::types::{Pid, Priority, Tick};
pub use config::{OutputFormat, SimConfig};
pub use monitoring::init_tracing;
pub use process::Process;
pub use scheduler::{
    AverageTimes, Policy, PolicyKind, ProcessStats, Scheduler, SchedulerCounters,
    SchedulingQueue, TickOutcome,
};
pub use simulation::{
    precision_round, ArrivalSchedule, LaneReport, ProcessSpec, RoundDirection, Simulation,
    SimulationReport,
};
