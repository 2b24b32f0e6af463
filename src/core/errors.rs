/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Priority, Tick};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Input parsing result
pub type InputResult<T> = Result<T, InputError>;

/// Simulation result
pub type SimResult<T> = Result<T, SimulationError>;

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Unsupported scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::unsupported_policy),
        help("Only FCFS, SJF and RR are supported.")
    )]
    UnsupportedPolicy(String),

    #[error("Invalid parameter: {0}")]
    #[diagnostic(
        code(scheduler::invalid_parameter),
        help("Only SJF queues take a preemptive flag, and only RR queues take a quantum.")
    )]
    InvalidParameter(String),

    #[error("Priority {priority} out of range: scheduler has {levels} queue(s)")]
    #[diagnostic(
        code(scheduler::invalid_priority),
        help("Priorities are queue indices starting at 0.")
    )]
    InvalidPriority { priority: Priority, levels: usize },

    #[error("Scheduling queue is empty")]
    #[diagnostic(
        code(scheduler::empty),
        help("Check `count()` before querying or advancing a queue.")
    )]
    Empty,

    #[error("Process {0} is already tracked by this scheduler")]
    #[diagnostic(
        code(scheduler::duplicate_process),
        help("Process ids must be unique per scheduler.")
    )]
    DuplicateProcess(Pid),
}

/// Input parsing errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    #[diagnostic(
        code(input::io),
        help("Check that the input file exists and is readable.")
    )]
    Io(String),

    #[error("Line {line}: {reason}")]
    #[diagnostic(
        code(input::invalid_line),
        help("Each line must hold `<arrival> <duration>`, both integers, duration > 0.")
    )]
    InvalidLine { line: usize, reason: String },
}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        InputError::Io(err.to_string())
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Unset the variable to fall back to its default.")
    )]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Unified simulation error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimulationError {
    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Input error: {0}")]
    #[diagnostic(transparent)]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Simulation stalled at tick {tick}")]
    #[diagnostic(
        code(simulation::stalled),
        help("Every process is inserted at priority 0; a lane that never drains indicates a scheduler bug.")
    )]
    Stalled { tick: Tick },

    #[error("Serialization error: {0}")]
    #[diagnostic(code(simulation::serialization))]
    Serialization(String),
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Serialization(err.to_string())
    }
}
