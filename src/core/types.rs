/*!
 * Core Types
 * Common types used across the simulator
 */

/// Simulated time, in whole ticks since the start of a run
pub type Tick = u64;

/// Priority level of a scheduling queue (0 is the only level advanced by `tick`)
pub type Priority = usize;

pub use super::id::Pid;
