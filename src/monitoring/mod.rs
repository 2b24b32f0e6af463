/*!
 * Monitoring Module
 * Structured logging setup
 */

pub mod tracer;

pub use tracer::{generate_run_id, init_tracing, RunSpan};
