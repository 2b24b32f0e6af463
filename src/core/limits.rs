/*!
 * Simulation Limits and Defaults
 *
 * Centralized location for simulator-wide defaults and bounds.
 */

// =============================================================================
// SCHEDULING
// =============================================================================

/// Round-robin time quantum used by the standard simulation (2 ticks)
pub const DEFAULT_QUANTUM: u64 = 2;

/// Whether the standard simulation's SJF lane is preemptive
pub const DEFAULT_SJF_PREEMPTIVE: bool = false;

/// Latest arrival tick accepted from an input file
pub const MAX_ARRIVAL_TICK: u64 = u32::MAX as u64;

/// Longest burst accepted from an input file
pub const MAX_BURST: u64 = u32::MAX as u64;

// =============================================================================
// REPORTING
// =============================================================================

/// Decimal places kept when rendering averages
pub const DEFAULT_REPORT_PRECISION: u32 = 1;

/// Upper bound for the report precision; 10^6 keeps f64 scaling exact enough
pub const MAX_REPORT_PRECISION: u32 = 6;
