/*!
 * Simulation Report
 * Per-lane averages with rounding, rendered as text or JSON
 */

use crate::core::errors::SimResult;
use crate::scheduler::{AverageTimes, Policy, ProcessStats, SchedulerCounters};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Rounding applied when rendering averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundDirection {
    #[default]
    Up,
    Down,
    Nearest,
}

/// Round `value` to `precision` decimal places in the given direction
pub fn precision_round(value: f64, precision: u32, direction: RoundDirection) -> f64 {
    let offset = 10f64.powi(precision as i32);
    let scaled = value * offset;

    let rounded = match direction {
        RoundDirection::Up => scaled.ceil(),
        RoundDirection::Down => scaled.floor(),
        RoundDirection::Nearest => scaled.round(),
    };

    rounded / offset
}

/// Outcome of one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneReport {
    pub label: String,
    pub policy: Policy,
    pub averages: AverageTimes,
    pub counters: SchedulerCounters,
    pub processes: Vec<ProcessStats>,
}

/// Outcome of a whole simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub lanes: Vec<LaneReport>,
}

impl SimulationReport {
    pub fn lane(&self, label: &str) -> Option<&LaneReport> {
        self.lanes.iter().find(|lane| lane.label == label)
    }

    /// One line per lane: `LABEL turnaround response waiting`
    pub fn render_text(&self, precision: u32, direction: RoundDirection) -> String {
        let mut out = String::new();
        for lane in &self.lanes {
            let avg = &lane.averages;
            let _ = writeln!(
                out,
                "{} {:.prec$} {:.prec$} {:.prec$}",
                lane.label,
                precision_round(avg.turnaround_time, precision, direction),
                precision_round(avg.response_time, precision, direction),
                precision_round(avg.waiting_time, precision, direction),
                prec = precision as usize,
            );
        }
        out
    }

    pub fn render_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
