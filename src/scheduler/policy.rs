/*!
 * Scheduling Policies
 * Closed set of disciplines with their per-variant parameters
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling discipline of one queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Policy {
    /// First come, first served
    Fcfs,
    /// Shortest job first; preemptive lets a shorter arrival overtake the running process
    ShortestJobFirst { preemptive: bool },
    /// Round robin with a fixed quantum in ticks
    RoundRobin { quantum: u64 },
}

/// Policy name without parameters, as accepted on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Fcfs,
    ShortestJobFirst,
    /// Shorthand for preemptive SJF
    ShortestRemainingTime,
    RoundRobin,
}

impl PolicyKind {
    /// Parse from string representation
    pub fn parse(s: &str) -> SchedulerResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::ShortestJobFirst),
            "srtf" | "psjf" => Ok(Self::ShortestRemainingTime),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(SchedulerError::UnsupportedPolicy(s.to_string())),
        }
    }
}

impl Policy {
    /// Non-preemptive SJF
    pub const SJF: Policy = Policy::ShortestJobFirst { preemptive: false };

    /// Preemptive SJF
    pub const SRTF: Policy = Policy::ShortestJobFirst { preemptive: true };

    /// Round robin, rejecting a zero quantum
    pub fn round_robin(quantum: u64) -> SchedulerResult<Self> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidParameter(
                "round-robin quantum must be positive".into(),
            ));
        }
        Ok(Policy::RoundRobin { quantum })
    }

    /// Build a policy from its name and optional parameters
    ///
    /// `preemptive` is only valid for SJF and `quantum` only for RR, which
    /// requires one.
    pub fn from_parts(
        name: &str,
        preemptive: Option<bool>,
        quantum: Option<u64>,
    ) -> SchedulerResult<Self> {
        let kind = PolicyKind::parse(name)?;

        if preemptive.is_some()
            && !matches!(
                kind,
                PolicyKind::ShortestJobFirst | PolicyKind::ShortestRemainingTime
            )
        {
            return Err(SchedulerError::InvalidParameter(format!(
                "only SJF queues may be preemptive, got '{}'",
                name
            )));
        }

        if quantum.is_some() && kind != PolicyKind::RoundRobin {
            return Err(SchedulerError::InvalidParameter(format!(
                "only round-robin queues take a quantum, got '{}'",
                name
            )));
        }

        match kind {
            PolicyKind::Fcfs => Ok(Policy::Fcfs),
            PolicyKind::ShortestJobFirst => Ok(Policy::ShortestJobFirst {
                preemptive: preemptive.unwrap_or(false),
            }),
            PolicyKind::ShortestRemainingTime => {
                if preemptive == Some(false) {
                    return Err(SchedulerError::InvalidParameter(format!(
                        "'{}' is always preemptive",
                        name
                    )));
                }
                Ok(Policy::SRTF)
            }
            PolicyKind::RoundRobin => match quantum {
                Some(q) => Policy::round_robin(q),
                None => Err(SchedulerError::InvalidParameter(
                    "round-robin queues need a quantum".into(),
                )),
            },
        }
    }

    /// Short display name
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::ShortestJobFirst { preemptive: false } => "sjf",
            Self::ShortestJobFirst { preemptive: true } => "srtf",
            Self::RoundRobin { .. } => "rr",
        }
    }

    #[inline]
    pub const fn quantum(&self) -> Option<u64> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::ShortestJobFirst { preemptive: true })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "rr(q={})", quantum),
            other => f.write_str(other.as_str()),
        }
    }
}
