/*!
 * Simulation Module
 * Arrival schedules, the multi-lane driver, and report rendering
 */

pub mod driver;
pub mod report;
pub mod schedule;

pub use driver::{Lane, Simulation};
pub use report::{precision_round, LaneReport, RoundDirection, SimulationReport};
pub use schedule::{ArrivalSchedule, ProcessSpec};
