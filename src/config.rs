/*!
 * Simulation Configuration
 * Defaults overridable through SCHEDSIM_* environment variables
 */

use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_QUANTUM, DEFAULT_REPORT_PRECISION, DEFAULT_SJF_PREEMPTIVE, MAX_REPORT_PRECISION,
};
use crate::simulation::report::RoundDirection;
use serde::{Deserialize, Serialize};

pub const ENV_QUANTUM: &str = "SCHEDSIM_QUANTUM";
pub const ENV_SJF_PREEMPTIVE: &str = "SCHEDSIM_SJF_PREEMPTIVE";
pub const ENV_PRECISION: &str = "SCHEDSIM_PRECISION";
pub const ENV_ROUNDING: &str = "SCHEDSIM_ROUNDING";
pub const ENV_OUTPUT: &str = "SCHEDSIM_OUTPUT";

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for the standard simulation and its report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimConfig {
    /// Round-robin quantum in ticks
    pub quantum: u64,
    pub sjf_preemptive: bool,
    /// Decimal places in the text report
    pub precision: u32,
    pub rounding: RoundDirection,
    pub output: OutputFormat,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            sjf_preemptive: DEFAULT_SJF_PREEMPTIVE,
            precision: DEFAULT_REPORT_PRECISION,
            rounding: RoundDirection::Up,
            output: OutputFormat::Text,
        }
    }
}

impl SimConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup; unset keys keep their default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_QUANTUM) {
            config.quantum = match raw.trim().parse::<u64>() {
                Ok(q) if q > 0 => q,
                _ => return Err(invalid(ENV_QUANTUM, &raw, "expected a positive integer")),
            };
        }

        if let Some(raw) = lookup(ENV_SJF_PREEMPTIVE) {
            config.sjf_preemptive = parse_flag(&raw)
                .ok_or_else(|| invalid(ENV_SJF_PREEMPTIVE, &raw, "expected true or false"))?;
        }

        if let Some(raw) = lookup(ENV_PRECISION) {
            config.precision = match raw.trim().parse::<u32>() {
                Ok(p) if p <= MAX_REPORT_PRECISION => p,
                _ => {
                    return Err(invalid(
                        ENV_PRECISION,
                        &raw,
                        &format!("expected an integer between 0 and {}", MAX_REPORT_PRECISION),
                    ))
                }
            };
        }

        if let Some(raw) = lookup(ENV_ROUNDING) {
            config.rounding = match raw.trim().to_lowercase().as_str() {
                "up" | "ceil" => RoundDirection::Up,
                "down" | "floor" => RoundDirection::Down,
                "nearest" | "round" => RoundDirection::Nearest,
                _ => return Err(invalid(ENV_ROUNDING, &raw, "expected up, down or nearest")),
            };
        }

        if let Some(raw) = lookup(ENV_OUTPUT) {
            config.output = match raw.trim().to_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => return Err(invalid(ENV_OUTPUT, &raw, "expected text or json")),
            };
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
