/*!
 * Arrival Schedule
 * Processes grouped by the tick they arrive at, parsed from `arrival duration` lines
 */

use crate::core::errors::{InputError, InputResult, SchedulerResult};
use crate::core::id::IdGenerator;
use crate::core::limits::{MAX_ARRIVAL_TICK, MAX_BURST};
use crate::core::types::Tick;
use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// One input record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival: Tick,
    pub burst: Tick,
}

impl ProcessSpec {
    pub fn new(arrival: Tick, burst: Tick) -> Self {
        Self { arrival, burst }
    }
}

/// Mapping from tick to the processes arriving then, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrivalSchedule {
    arrivals: BTreeMap<Tick, Vec<ProcessSpec>>,
    len: usize,
}

impl ArrivalSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ProcessSpec>) -> Self {
        let mut schedule = Self::new();
        for spec in records {
            schedule.push(spec);
        }
        schedule
    }

    /// Parse one `arrival duration` record per line
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> InputResult<Self> {
        let mut schedule = Self::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            schedule.push(parse_line(idx + 1, line)?);
        }

        debug!(processes = schedule.len(), horizon = schedule.horizon(), "Parsed arrival schedule");
        Ok(schedule)
    }

    /// Read and parse an input file
    pub fn from_path(path: impl AsRef<Path>) -> InputResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| InputError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }

    pub fn push(&mut self, spec: ProcessSpec) {
        self.arrivals.entry(spec.arrival).or_default().push(spec);
        self.len += 1;
    }

    /// Processes arriving at `tick`
    pub fn arrivals_at(&self, tick: Tick) -> &[ProcessSpec] {
        self.arrivals.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Create the processes arriving at `tick`, one fresh id each
    pub fn spawn_at(&self, tick: Tick, ids: &dyn IdGenerator) -> SchedulerResult<Vec<Process>> {
        self.arrivals_at(tick)
            .iter()
            .map(|spec| Process::new(ids.next(), spec.burst))
            .collect()
    }

    /// One past the last arrival tick, 0 when empty
    pub fn horizon(&self) -> Tick {
        self.arrivals
            .keys()
            .next_back()
            .map_or(0, |&last| last.saturating_add(1))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sum of every burst
    pub fn total_burst(&self) -> Tick {
        self.iter()
            .fold(0, |total: Tick, spec| total.saturating_add(spec.burst))
    }

    /// Every record, by arrival tick then input order
    pub fn iter(&self) -> impl Iterator<Item = &ProcessSpec> {
        self.arrivals.values().flatten()
    }
}

fn parse_line(line: usize, text: &str) -> InputResult<ProcessSpec> {
    let invalid = |reason: String| InputError::InvalidLine { line, reason };

    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(invalid(format!(
            "expected 2 fields, found {}",
            fields.len()
        )));
    }

    let arrival = fields[0]
        .parse::<Tick>()
        .map_err(|_| invalid(format!("arrival time '{}' is not a non-negative integer", fields[0])))?;
    let burst = fields[1]
        .parse::<Tick>()
        .map_err(|_| invalid(format!("duration '{}' is not a non-negative integer", fields[1])))?;

    if burst == 0 {
        return Err(invalid("duration must be positive".into()));
    }
    if arrival > MAX_ARRIVAL_TICK {
        return Err(invalid(format!(
            "arrival time {} exceeds the limit of {}",
            arrival, MAX_ARRIVAL_TICK
        )));
    }
    if burst > MAX_BURST {
        return Err(invalid(format!(
            "duration {} exceeds the limit of {}",
            burst, MAX_BURST
        )));
    }

    Ok(ProcessSpec::new(arrival, burst))
}
