/*!
 * Structured Tracing
 * Subscriber setup and run-level spans using the tracing crate
 *
 * Features:
 * - Run ID generation for log correlation
 * - JSON-formatted logs for structured parsing
 * - Per-run spans that record how long the simulation took
 */

use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Environment variable enabling JSON log output
pub const ENV_TRACE_JSON: &str = "SCHEDSIM_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCHEDSIM_TRACE_JSON: Enable JSON output (default: false)
///
/// Logs go to stderr so stdout carries only the report. Calling this twice
/// keeps the first subscriber.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized with JSON output");
        }
    } else {
        let installed = registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok();
        if installed {
            info!("Structured tracing initialized");
        }
    }
}

/// Generate a unique run ID for log correlation
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one simulation run
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
    run_id: String,
}

impl RunSpan {
    pub fn new(lanes: usize, processes: usize) -> Self {
        let run_id = generate_run_id();

        let span = span!(
            Level::INFO,
            "simulation",
            run_id = %run_id,
            lanes = lanes,
            processes = processes,
            ticks = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            run_id,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Record how many ticks the run needed
    pub fn record_ticks(&self, ticks: u64) {
        self.span.record("ticks", ticks);
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);
        debug!(
            run_id = %self.run_id,
            duration_us = duration.as_micros() as u64,
            "simulation span closed"
        );
    }
}
